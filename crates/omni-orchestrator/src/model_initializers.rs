use omni_configuration::SystemConfigurations;
use omni_service_environment::ServiceEnvironment;
use omni_service_environment::identifiers::IdGenerator;
use tracing::info;

use crate::persistent_store::KeyValueStorage;
use crate::persistent_store::PersistentStore;

/// Rehydrates both repositories. Each collection independently falls back to
/// the seed when nothing usable is persisted for it.
pub fn initialize_service_environment<S: KeyValueStorage>(
    system_configurations: &SystemConfigurations,
    persistent_store: &PersistentStore<S>,
) -> ServiceEnvironment {
    let identifiers = &system_configurations.identifiers;
    let mut builder = ServiceEnvironment::builder()
        .order_id_generator(IdGenerator::new(identifiers.order_prefix.as_str()))
        .schedule_id_generator(IdGenerator::new(identifiers.schedule_prefix.as_str()));

    match persistent_store.load_service_orders() {
        Some(service_orders) => {
            info!(count = service_orders.len(), "rehydrated service orders");
            builder = builder.service_orders(service_orders);
        }
        None => info!("starting from the seed service orders"),
    }

    match persistent_store.load_schedule_items() {
        Some(schedule_items) => {
            info!(count = schedule_items.len(), "rehydrated schedule items");
            builder = builder.schedule_items(schedule_items);
        }
        None => info!("starting from the seed schedule items"),
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use omni_configuration::Persistence;
    use omni_service_environment::seed;

    use super::*;
    use crate::persistent_store::MemoryStorage;

    #[test]
    fn test_empty_store_yields_seed() {
        let persistent_store = PersistentStore::new(MemoryStorage::default(), &Persistence::default());

        let service_environment =
            initialize_service_environment(&SystemConfigurations::default(), &persistent_store);

        assert_eq!(service_environment.service_orders.records(), seed::service_orders().as_slice());
        assert_eq!(service_environment.schedule_items.list(), seed::schedule_items().as_slice());
    }

    #[test]
    fn test_collections_fall_back_independently() {
        let mut persistent_store =
            PersistentStore::new(MemoryStorage::default(), &Persistence::default());
        persistent_store.save_service_orders(&[]);
        persistent_store
            .storage_mut()
            .write("omni_schedule", "garbage")
            .unwrap();

        let service_environment =
            initialize_service_environment(&SystemConfigurations::default(), &persistent_store);

        assert!(service_environment.service_orders.is_empty());
        assert_eq!(service_environment.schedule_items.list(), seed::schedule_items().as_slice());
    }
}
