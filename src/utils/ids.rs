use uuid::Uuid;

/// Opaque unique id for stored records.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
