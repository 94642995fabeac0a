use crate::schema::ParleyConfig;

/// Validate session defaults.
pub(crate) fn validate_session(errors: &mut Vec<String>, config: &ParleyConfig) {
    let session = &config.session;
    if session.model.trim().is_empty() {
        errors.push("session.model is empty".into());
    }
    if session.locale.trim().is_empty() {
        errors.push("session.locale is empty".into());
    }
    if session.timezone.trim().is_empty() {
        errors.push("session.timezone is empty".into());
    }
}
