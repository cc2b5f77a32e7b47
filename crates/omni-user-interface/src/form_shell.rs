use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::modal::Modal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("the form is not open")]
    Closed,
    #[error("the form has no field named `{0}`")]
    UnknownField(String),
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    #[error("`{value}` is not a valid value for `{field}`")]
    InvalidValue { field: &'static str, value: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Date,
    Choice(&'static [&'static str]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: Option<&'static str>,
}

/// Raw field values keyed by field name, as collected from the user.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The trimmed value of a field that must not be empty.
    pub fn required(&self, name: &'static str) -> Result<&str, FormError> {
        match self.get(name).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(FormError::MissingField(name)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// A domain form that the shell can present. The model decides which fields
/// exist, how they are pre-filled and how submitted values are parsed.
pub trait FormModel {
    type Target;
    type Key: Clone + Debug + PartialEq;
    type Output;

    fn create_title(&self) -> String;

    fn edit_title(&self, target: &Self::Target) -> String;

    fn fields(&self) -> &'static [FieldSpec];

    fn defaults(&self) -> FormValues;

    fn prefill(&self, target: &Self::Target) -> FormValues;

    fn key_of(&self, target: &Self::Target) -> Self::Key;

    fn parse(&self, values: &FormValues) -> Result<Self::Output, FormError>;
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum FormMode<K> {
    Create,
    Edit(K),
}

/// What a successful submit emits. Dispatching it is the caller's job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormSubmission<K, O> {
    Create(O),
    Edit(K, O),
}

pub struct FormShell<M: FormModel> {
    model: M,
    modal: Modal,
    mode: FormMode<M::Key>,
    values: FormValues,
}

impl<M: FormModel> FormShell<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            modal: Modal::default(),
            mode: FormMode::Create,
            values: FormValues::default(),
        }
    }

    pub fn open_create(&mut self) {
        self.mode = FormMode::Create;
        self.values = self.model.defaults();
        self.modal.open(self.model.create_title());
    }

    pub fn open_edit(&mut self, target: &M::Target) {
        self.mode = FormMode::Edit(self.model.key_of(target));
        self.values = self.model.prefill(target);
        self.modal.open(self.model.edit_title(target));
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        if !self.modal.is_open() {
            return Err(FormError::Closed);
        }
        if !self.model.fields().iter().any(|field| field.name == name) {
            return Err(FormError::UnknownField(name.to_string()));
        }
        self.values.insert(name, value);
        Ok(())
    }

    /// Parses the collected values. The form stays open either way so the
    /// caller can close it once the submission has been applied.
    pub fn submit(&self) -> Result<FormSubmission<M::Key, M::Output>, FormError> {
        if !self.modal.is_open() {
            return Err(FormError::Closed);
        }
        let output = self.model.parse(&self.values)?;
        Ok(match &self.mode {
            FormMode::Create => FormSubmission::Create(output),
            FormMode::Edit(key) => FormSubmission::Edit(key.clone(), output),
        })
    }

    pub fn close(&mut self) {
        self.modal.close();
        self.mode = FormMode::Create;
        self.values = FormValues::default();
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn mode(&self) -> &FormMode<M::Key> {
        &self.mode
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.model.fields()
    }
}
