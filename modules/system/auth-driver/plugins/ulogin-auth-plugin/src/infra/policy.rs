use auth_driver_sdk::RegistrationPolicy;

/// Self-registration switch read from configuration.
#[derive(Debug, Clone, Copy)]
pub struct StaticRegistrationPolicy {
    self_registration: bool,
}

impl StaticRegistrationPolicy {
    #[must_use]
    pub fn new(self_registration: bool) -> Self {
        Self { self_registration }
    }
}

impl RegistrationPolicy for StaticRegistrationPolicy {
    fn is_self_registration_enabled(&self) -> bool {
        self.self_registration
    }
}
