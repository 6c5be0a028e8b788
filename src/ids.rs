use uuid::Uuid;

/// The well-known all-zero trace id used when a caller supplies none.
///
/// Emitted lines never carry an empty trace id field; absence is replaced
/// by this value.
pub fn default_trace_id() -> String {
    Uuid::nil().to_string()
}

/// Generate a fresh random trace id (v4 UUID).
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_trace_id_is_all_zero() {
        assert_eq!(default_trace_id(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_generated_trace_id_is_never_default() {
        let id = generate_trace_id();
        assert!(!id.is_empty());
        assert_ne!(id, default_trace_id());
    }

    #[test]
    fn test_generated_trace_ids_do_not_repeat() {
        assert_ne!(generate_trace_id(), generate_trace_id());
    }

    #[test]
    fn test_generated_trace_id_shape() {
        let id = generate_trace_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.chars().filter(|c| *c == '-').count(), 4);
    }
}
