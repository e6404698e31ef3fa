//! Compiler and render errors.

use etch_carton::CompactString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::Location;

/// Error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ErrorKind {
    /// Malformed markup, reported while parsing
    Syntax = 0,
    /// Conflicting attribute assignments
    MergeConflict = 1,
    /// A value of the wrong shape for where it is used
    ValueType = 2,
    /// Rejected component registration
    Validation = 3,
    /// Raised while invoking a component
    Component = 4,
}

/// Errors produced while parsing, compiling or rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EtchError {
    #[error("Expected corresponding closing tag for <{expected}>, found </{found}> at {loc}")]
    MismatchedClosingTag {
        expected: CompactString,
        found: CompactString,
        loc: Location,
    },

    #[error("Unexpected closing tag </{found}> at {loc}")]
    UnexpectedClosingTag { found: CompactString, loc: Location },

    #[error("Expected corresponding closing tag for <{tag}> opened at {loc}")]
    UnclosedTag { tag: CompactString, loc: Location },

    #[error("Interpolation is not allowed {position} at {loc}")]
    MisplacedInterpolation {
        position: &'static str,
        loc: Location,
    },

    #[error("Missing attribute name before `=` at {loc}")]
    MissingAttributeName { loc: Location },

    #[error("Missing value for attribute `{name}` at {loc}")]
    MissingAttributeValue { name: CompactString, loc: Location },

    #[error("Unexpected character `{ch}` {context} at {loc}")]
    UnexpectedCharacter {
        ch: char,
        context: &'static str,
        loc: Location,
    },

    #[error("Unexpected end of template {context}")]
    UnexpectedEnd { context: &'static str },

    #[error("Can only set one of `children` or `props.dangerouslySetInnerHTML`.")]
    ChildrenConflict,

    #[error(
        "`props.dangerouslySetInnerHTML` must be in the form `{{__html: ...}}`. \
         Please visit https://fb.me/react-invariant-dangerously-set-inner-html for more information."
    )]
    InnerHtmlShape,

    #[error(
        "The `style` prop expects a mapping from style properties to values, not a string. \
         For example, style={{{{marginRight: spacing + 'em'}}}} when using JSX."
    )]
    StyleNotObject,

    #[error("{tag} is a void element tag and must neither have `children` nor use `dangerouslySetInnerHTML`.")]
    VoidElementChildren { tag: CompactString },

    #[error("Template expects {expected} values but received {received}")]
    ValueCountMismatch { expected: usize, received: usize },

    #[error("Component names must be PascalCase, received `{name}`")]
    InvalidComponentName { name: CompactString },

    #[error("Cannot register `{name}`: {reason}")]
    UnsupportedComponent {
        name: CompactString,
        reason: &'static str,
    },

    #[error("A context consumer expects a function as its only child")]
    ConsumerChild,

    #[error("Maximum component depth of {limit} exceeded")]
    RecursionLimit { limit: usize },

    #[error("{0}")]
    Component(CompactString),
}

impl EtchError {
    /// Create an error raised from user component code.
    pub fn component(message: impl Into<CompactString>) -> Self {
        Self::Component(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MismatchedClosingTag { .. }
            | Self::UnexpectedClosingTag { .. }
            | Self::UnclosedTag { .. }
            | Self::MisplacedInterpolation { .. }
            | Self::MissingAttributeName { .. }
            | Self::MissingAttributeValue { .. }
            | Self::UnexpectedCharacter { .. }
            | Self::UnexpectedEnd { .. } => ErrorKind::Syntax,
            Self::ChildrenConflict => ErrorKind::MergeConflict,
            Self::InnerHtmlShape
            | Self::StyleNotObject
            | Self::VoidElementChildren { .. }
            | Self::ValueCountMismatch { .. } => ErrorKind::ValueType,
            Self::InvalidComponentName { .. } | Self::UnsupportedComponent { .. } => {
                ErrorKind::Validation
            }
            Self::ConsumerChild | Self::RecursionLimit { .. } | Self::Component(_) => {
                ErrorKind::Component
            }
        }
    }

    /// Source location, for syntax errors.
    pub fn loc(&self) -> Option<Location> {
        match self {
            Self::MismatchedClosingTag { loc, .. }
            | Self::UnexpectedClosingTag { loc, .. }
            | Self::UnclosedTag { loc, .. }
            | Self::MisplacedInterpolation { loc, .. }
            | Self::MissingAttributeName { loc }
            | Self::MissingAttributeValue { loc, .. }
            | Self::UnexpectedCharacter { loc, .. } => Some(*loc),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtchError>;
