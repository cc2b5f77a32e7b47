use std::fmt;

use super::ServiceOrder;

impl fmt::Display for ServiceOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} [{} | {}] at {}, due {}",
            self.id, self.title, self.priority, self.status, self.location, self.deadline
        )?;
        if let Some(evidence_image) = &self.evidence_image {
            write!(f, ", evidence {}", evidence_image)?;
        }
        Ok(())
    }
}
