/// Fresh random v4 UUID in its hyphenated string form.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
