pub use super::holder_role_threshold::Entity as HolderRoleThreshold;
pub use super::holder_user_role::Entity as HolderUserRole;
pub use super::holder_verification::Entity as HolderVerification;
pub use super::holder_verification_config::Entity as HolderVerificationConfig;
