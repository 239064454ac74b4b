//! Semantic types for Carlos

use std::fmt;

/// A resolved semantic type
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    Real,
    Bool,
    Char,
    Str,
    /// Return type of procedures
    Void,
    Function(Signature),
    /// Placeholder for a value whose type could not be resolved. A
    /// diagnostic has already been reported for it, so checks against an
    /// `Error` never report again.
    Error,
}

/// Parameter and return types of a function
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub params: Vec<Type>,
    pub return_type: Box<Type>,
}

impl Signature {
    pub fn new(params: Vec<Type>, return_type: Type) -> Self {
        Self {
            params,
            return_type: Box::new(return_type),
        }
    }
}

impl Type {
    pub fn function(params: Vec<Type>, return_type: Type) -> Self {
        Type::Function(Signature::new(params, return_type))
    }

    /// Check if this type is numeric (int or real)
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Type::Int | Type::Real)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Type::Bool)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    /// Check if a value of type `source` may be stored where `self` is expected
    pub fn is_assignable_from(&self, source: &Type) -> bool {
        match (self, source) {
            (Type::Error, _) | (_, Type::Error) => true,
            (Type::Real, Type::Int) => true,
            (target, source) => target == source,
        }
    }

    /// Check if `==`/`!=` may compare values of these two types
    pub fn is_comparable_with(&self, other: &Type) -> bool {
        (self.is_arithmetic() && other.is_arithmetic()) || self == other
    }

    /// Result type of an arithmetic operator on two numeric operands
    pub fn arithmetic_result(&self, other: &Type) -> Type {
        match (self, other) {
            (Type::Error, _) | (_, Type::Error) => Type::Error,
            (Type::Real, _) | (_, Type::Real) => Type::Real,
            _ => Type::Int,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Real => write!(f, "real"),
            Type::Bool => write!(f, "boolean"),
            Type::Char => write!(f, "char"),
            Type::Str => write!(f, "string"),
            Type::Void => write!(f, "void"),
            Type::Function(sig) => {
                write!(f, "function(")?;
                for (i, param) in sig.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") -> {}", sig.return_type)
            }
            Type::Error => write!(f, "<error>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        assert!(Type::Int.is_arithmetic());
        assert!(Type::Real.is_arithmetic());
        assert!(!Type::Bool.is_arithmetic());
        assert!(!Type::Error.is_arithmetic());
    }

    #[test]
    fn test_assignability() {
        assert!(Type::Real.is_assignable_from(&Type::Int));
        assert!(!Type::Int.is_assignable_from(&Type::Real));
        assert!(!Type::Bool.is_assignable_from(&Type::Int));
        assert!(Type::Bool.is_assignable_from(&Type::Error));
        assert!(Type::Error.is_assignable_from(&Type::Str));
    }

    #[test]
    fn test_arithmetic_result() {
        assert_eq!(Type::Int.arithmetic_result(&Type::Int), Type::Int);
        assert_eq!(Type::Int.arithmetic_result(&Type::Real), Type::Real);
        assert_eq!(Type::Error.arithmetic_result(&Type::Real), Type::Error);
    }

    #[test]
    fn test_display() {
        let ty = Type::function(vec![Type::Int, Type::Bool], Type::Void);
        assert_eq!(ty.to_string(), "function(int, boolean) -> void");
        assert_eq!(Type::Str.to_string(), "string");
    }
}
