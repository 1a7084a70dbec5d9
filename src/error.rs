use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormError>;

/// Structural and I/O failures raised by form construction, layout and the
/// run loop.
///
/// Structural variants name the offending widget and the tree (form or
/// container) it was looked up in.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("`{owner}` already contains a `{name}` entry")]
    DuplicateName { owner: String, name: String },
    #[error("`{owner}` does not contain a `{name}` entry")]
    NotFound { owner: String, name: String },
    #[error("`{name}` is not a container")]
    NotAContainer { name: String },
    #[error("`{owner}` has no widgets to lay out")]
    EmptyTree { owner: String },
    #[error("{kind} `{name}` has nothing to render")]
    EmptyWidget { kind: &'static str, name: String },
    #[error("invalid value `{value}` for style `{key}`")]
    InvalidStyle { key: String, value: String },
    #[error("hook name `{name}` must start with {expected}")]
    InvalidHookName { name: String, expected: &'static str },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FormError {
    pub(crate) fn duplicate(owner: &str, name: &str) -> Self {
        Self::DuplicateName {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn not_found(owner: &str, name: &str) -> Self {
        Self::NotFound {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn empty_tree(owner: &str) -> Self {
        Self::EmptyTree {
            owner: owner.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_entry() {
        let err = FormError::duplicate("form", "email");
        assert_eq!(err.to_string(), "`form` already contains a `email` entry");

        let err = FormError::EmptyWidget {
            kind: "dropdown",
            name: "country".to_string(),
        };
        assert_eq!(err.to_string(), "dropdown `country` has nothing to render");
    }

    #[test]
    fn io_errors_convert() {
        let err: FormError = io::Error::other("gone").into();
        assert!(matches!(err, FormError::Io(_)));
    }
}
