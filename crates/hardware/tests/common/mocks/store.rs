use archsim_core::Configuration;
use archsim_core::common::StoreError;
use archsim_core::store::{ConfigStore, Identity, SavedConfig};
use mockall::mock;

mock! {
    pub Store {}
    impl ConfigStore for Store {
        fn save(&self, owner: &Identity, name: &str, config: &Configuration) -> Result<u64, StoreError>;
        fn list(&self, owner: &Identity) -> Result<Vec<SavedConfig>, StoreError>;
        fn load(&self, owner: &Identity, id: u64) -> Result<Configuration, StoreError>;
    }
}
