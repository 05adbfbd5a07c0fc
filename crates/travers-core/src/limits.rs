//! Input validation limits for traversal requests

/// Maximum traversal depth accepted by the query façade (50)
pub const MAX_TRAVERSAL_DEPTH: u32 = 50;

/// Maximum length for a label (256 chars)
pub const MAX_LABEL_LEN: usize = 256;

/// Maximum length for a property key (256 chars)
pub const MAX_PROPERTY_KEY_LEN: usize = 256;

/// Maximum relationship types in a single expansion filter (64)
pub const MAX_RELATIONSHIP_TYPES: usize = 64;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvertedDepthRange { min: u32, max: u32 },
    TraversalDepthTooLarge { depth: u32, max: u32 },
    LabelTooLong { len: usize, max: usize },
    PropertyKeyTooLong { len: usize, max: usize },
    TooManyRelationshipTypes { count: usize, max: usize },
    EmptyLabel,
    EmptyPropertyKey,
    EmptyRelationshipType,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvertedDepthRange { min, max } => {
                write!(f, "Minimum depth {} exceeds maximum depth {}", min, max)
            }
            Self::TraversalDepthTooLarge { depth, max } => {
                write!(f, "Traversal depth too large: {} (max {})", depth, max)
            }
            Self::LabelTooLong { len, max } => {
                write!(f, "Label too long: {} chars (max {})", len, max)
            }
            Self::PropertyKeyTooLong { len, max } => {
                write!(f, "Property key too long: {} chars (max {})", len, max)
            }
            Self::TooManyRelationshipTypes { count, max } => {
                write!(f, "Too many relationship types: {} (max {})", count, max)
            }
            Self::EmptyLabel => write!(f, "Label cannot be empty"),
            Self::EmptyPropertyKey => write!(f, "Property key cannot be empty"),
            Self::EmptyRelationshipType => write!(f, "Relationship type cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a depth range
pub fn validate_depth_range(min: u32, max: u32) -> Result<(), ValidationError> {
    if min > max {
        return Err(ValidationError::InvertedDepthRange { min, max });
    }
    Ok(())
}

/// Validate traversal depth
pub fn validate_traversal_depth(depth: u32) -> Result<(), ValidationError> {
    if depth > MAX_TRAVERSAL_DEPTH {
        return Err(ValidationError::TraversalDepthTooLarge {
            depth,
            max: MAX_TRAVERSAL_DEPTH,
        });
    }
    Ok(())
}

/// Validate label
pub fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(ValidationError::LabelTooLong {
            len: label.len(),
            max: MAX_LABEL_LEN,
        });
    }
    Ok(())
}

/// Validate property key
pub fn validate_property_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::EmptyPropertyKey);
    }
    if key.len() > MAX_PROPERTY_KEY_LEN {
        return Err(ValidationError::PropertyKeyTooLong {
            len: key.len(),
            max: MAX_PROPERTY_KEY_LEN,
        });
    }
    Ok(())
}

/// Validate a relationship type filter
pub fn validate_relationship_types(types: &[String]) -> Result<(), ValidationError> {
    if types.len() > MAX_RELATIONSHIP_TYPES {
        return Err(ValidationError::TooManyRelationshipTypes {
            count: types.len(),
            max: MAX_RELATIONSHIP_TYPES,
        });
    }
    if types.iter().any(|t| t.is_empty()) {
        return Err(ValidationError::EmptyRelationshipType);
    }
    Ok(())
}
