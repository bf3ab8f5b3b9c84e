use super::ApiError;
use crate::domain::RecordId;

pub fn validate_record_id(id: i32) -> Result<RecordId, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid record ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(RecordId::new(id))
}

/// An empty query is allowed and means "everything".
pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    const MAX_LEN: usize = 200;

    let trimmed = query.trim();
    if trimmed.chars().count() > MAX_LEN {
        return Err(ApiError::validation(format!(
            "Search query must be {} characters or less",
            MAX_LEN
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_record_id() {
        assert_eq!(validate_record_id(1).unwrap().value(), 1);
        assert!(validate_record_id(12345).is_ok());
        assert!(validate_record_id(0).is_err());
        assert!(validate_record_id(-1).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  dune ").unwrap(), "dune");
        assert_eq!(validate_search_query("   ").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(201)).is_err());
    }
}
