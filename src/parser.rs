//! Recursive-descent translator from schema source to declarations.
//!
//! Single token of lookahead, no backtracking, no error recovery: the
//! first failure aborts the whole pass. Constant references are validated
//! against a symbol table built in source order, so a constant must be
//! declared strictly before any reference to it.

use std::collections::HashSet;

use crate::ast::{Declaration, EnumMember, FieldDecl, TypeRef, ValueRef};
use crate::error::CompileError;
use crate::lexer::{Lexer, Token, TokenKind, TokenType};

/// Translate schema source text into an ordered declaration list.
pub fn translate(source: &str) -> Result<Vec<Declaration>, CompileError> {
    Translator::new(source)?.translate_toplevel()
}

/// The schema parser. Consumes a [`Lexer`] one token at a time.
pub struct Translator<'a> {
    lexer: Lexer<'a>,
    token: Option<Token>,
    constants: HashSet<String>,
}

impl<'a> Translator<'a> {
    pub fn new(source: &'a str) -> Result<Self, CompileError> {
        let mut translator = Translator {
            lexer: Lexer::new(source),
            token: None,
            constants: HashSet::new(),
        };
        translator.advance()?;
        Ok(translator)
    }

    /// Pull the next token from the lexer, returning the one it replaces.
    fn advance(&mut self) -> Result<Option<Token>, CompileError> {
        let next = match self.lexer.next() {
            Some(result) => Some(result?),
            None => None,
        };
        Ok(std::mem::replace(&mut self.token, next))
    }

    fn current_ty(&self) -> Option<TokenType> {
        self.token.as_ref().map(Token::ty)
    }

    /// A translation error at the current token's position, or at end of
    /// input when the stream is exhausted.
    fn error(&self, message: String) -> CompileError {
        let (line, column) = match self.token.as_ref() {
            Some(t) => (t.line, t.column),
            None => self.lexer.current_position(),
        };
        CompileError::Translation {
            line,
            column,
            message,
        }
    }

    /// Consume and return the current token if its type is one of `types`,
    /// else fail naming the expected types and the actual one.
    fn expect(&mut self, types: &[TokenType]) -> Result<Token, CompileError> {
        if let Some(token) = self.token.take() {
            if types.contains(&token.ty()) {
                self.token = match self.lexer.next() {
                    Some(result) => Some(result?),
                    None => None,
                };
                return Ok(token);
            }
            self.token = Some(token);
        }
        let expected = types
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" or ");
        let actual = match self.current_ty() {
            Some(ty) => ty.to_string(),
            None => "end of input".to_string(),
        };
        Err(self.error(format!("expected {}, found {}", expected, actual)))
    }

    /// Parse every top-level declaration until the stream is exhausted.
    pub fn translate_toplevel(mut self) -> Result<Vec<Declaration>, CompileError> {
        let mut declarations = Vec::new();
        while let Some(ty) = self.current_ty() {
            let declaration = match ty {
                TokenType::Const => self.translate_const()?,
                TokenType::Enum => self.translate_enum()?,
                TokenType::Struct => self.translate_struct()?,
                other => {
                    return Err(self.error(format!(
                        "expected 'const', 'enum' or 'struct', found {}",
                        other
                    )));
                }
            };
            declarations.push(declaration);
        }
        Ok(declarations)
    }

    /// A value position: a literal number, or the name of an already
    /// declared constant.
    fn translate_value(&mut self) -> Result<ValueRef, CompileError> {
        let token = self.expect(&[TokenType::Number, TokenType::Ident])?;
        let (line, column) = (token.line, token.column);
        match token.kind {
            TokenKind::Number(value) => Ok(ValueRef::Literal(value)),
            TokenKind::Ident(name) => {
                if !self.constants.contains(&name) {
                    // The error cites the referencing token, not wherever
                    // the parser happens to be looking next.
                    return Err(CompileError::Translation {
                        line,
                        column,
                        message: format!("reference to unknown constant {}", name),
                    });
                }
                Ok(ValueRef::Constant(name))
            }
            _ => unreachable!("expect() only admits numbers and identifiers"),
        }
    }

    fn expect_ident(&mut self) -> Result<String, CompileError> {
        let token = self.expect(&[TokenType::Ident])?;
        match token.kind {
            TokenKind::Ident(name) => Ok(name),
            _ => unreachable!("expect() only admits identifiers"),
        }
    }

    /// `const NAME = value ;`
    fn translate_const(&mut self) -> Result<Declaration, CompileError> {
        self.expect(&[TokenType::Const])?;
        let name = self.expect_ident()?;
        self.expect(&[TokenType::Assign])?;
        let value = self.translate_value()?;
        self.expect(&[TokenType::Semicolon])?;
        self.constants.insert(name.clone());
        Ok(Declaration::Const { name, value })
    }

    /// `enum NAME { member = value (, member = value)* } ;`
    fn translate_enum(&mut self) -> Result<Declaration, CompileError> {
        self.expect(&[TokenType::Enum])?;
        let name = self.expect_ident()?;
        self.expect(&[TokenType::OpenBrace])?;
        let mut members = Vec::new();
        loop {
            let member_name = self.expect_ident()?;
            self.expect(&[TokenType::Assign])?;
            let value = self.translate_value()?;
            members.push(EnumMember {
                name: member_name,
                value,
            });
            let delimiter = self.expect(&[TokenType::CloseBrace, TokenType::Comma])?;
            if delimiter.ty() == TokenType::CloseBrace {
                break;
            }
        }
        self.expect(&[TokenType::Semicolon])?;
        Ok(Declaration::Enum { name, members })
    }

    /// `struct NAME { (type name ;)+ } ;`
    fn translate_struct(&mut self) -> Result<Declaration, CompileError> {
        self.expect(&[TokenType::Struct])?;
        let name = self.expect_ident()?;
        self.expect(&[TokenType::OpenBrace])?;
        let mut fields = Vec::new();
        loop {
            fields.push(self.translate_field()?);
            self.expect(&[TokenType::Semicolon])?;
            if self.current_ty() == Some(TokenType::CloseBrace) {
                break;
            }
        }
        self.expect(&[TokenType::CloseBrace])?;
        self.expect(&[TokenType::Semicolon])?;
        Ok(Declaration::Struct { name, fields })
    }

    /// A field declaration: a bare identifier naming a declared type, or
    /// the compound scalar form `[unsigned] int`, then the field's name.
    fn translate_field(&mut self) -> Result<FieldDecl, CompileError> {
        let type_ref = if self.current_ty() == Some(TokenType::Ident) {
            TypeRef::Named(self.expect_ident()?)
        } else {
            let unsigned = if self.current_ty() == Some(TokenType::Unsigned) {
                self.advance()?;
                true
            } else {
                false
            };
            self.expect(&[TokenType::Int])?;
            if unsigned {
                TypeRef::UnsignedInt
            } else {
                TypeRef::Int
            }
        };
        let name = self.expect_ident()?;
        Ok(FieldDecl { type_ref, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_declaration() {
        let decls = translate("const MAXUSERNAME = 32;").unwrap();
        assert_eq!(
            decls,
            vec![Declaration::Const {
                name: "MAXUSERNAME".to_string(),
                value: ValueRef::Literal(32),
            }]
        );
    }

    #[test]
    fn constant_usable_after_declaration() {
        let decls = translate("const A = 1; const B = A;").unwrap();
        assert_eq!(decls.len(), 2);
        assert_eq!(
            decls[1],
            Declaration::Const {
                name: "B".to_string(),
                value: ValueRef::Constant("A".to_string()),
            }
        );
    }

    #[test]
    fn unknown_constant_cites_referencing_token() {
        let err = translate("const A = MISSING;").unwrap_err();
        let CompileError::Translation { line, column, message } = err else {
            panic!("expected translation error");
        };
        assert_eq!((line, column), (1, 11));
        assert!(message.contains("MISSING"));
    }

    #[test]
    fn forward_constant_reference_is_rejected() {
        assert!(translate("const B = A; const A = 1;").is_err());
    }

    #[test]
    fn struct_with_scalar_fields() {
        let decls = translate("struct s { int a; unsigned int b; };").unwrap();
        assert_eq!(
            decls,
            vec![Declaration::Struct {
                name: "s".to_string(),
                fields: vec![
                    FieldDecl {
                        type_ref: TypeRef::Int,
                        name: "a".to_string(),
                    },
                    FieldDecl {
                        type_ref: TypeRef::UnsignedInt,
                        name: "b".to_string(),
                    },
                ],
            }]
        );
    }

    #[test]
    fn enum_members_keep_declaration_order() {
        let decls = translate("enum e { B = 1, A = 0 };").unwrap();
        let Declaration::Enum { members, .. } = &decls[0] else {
            panic!("expected enum declaration");
        };
        assert_eq!(members[0].name, "B");
        assert_eq!(members[1].name, "A");
    }

    #[test]
    fn empty_enum_is_rejected() {
        assert!(translate("enum e { };").is_err());
    }

    #[test]
    fn empty_struct_is_rejected() {
        assert!(translate("struct s { };").is_err());
    }

    #[test]
    fn missing_semicolon_reports_end_of_input() {
        let err = translate("const A = 1").unwrap_err();
        let CompileError::Translation { line, column, message } = err else {
            panic!("expected translation error");
        };
        assert!(message.contains("end of input"), "{}", message);
        // Just past the last character of the source.
        assert_eq!((line, column), (1, 12));
    }

    #[test]
    fn stray_token_at_toplevel() {
        let err = translate("const A = 1; 5").unwrap_err();
        assert!(matches!(err, CompileError::Translation { line: 1, column: 14, .. }));
    }
}
