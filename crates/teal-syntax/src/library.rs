//! Library and function definitions.
//! 函数库与函数定义。

use std::collections::HashMap;
use std::fmt;

use crate::Expr;
use teal_common::Span;

/// An identifier with its source location.
/// 带源码位置的标识符。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A function definition `name(param): body`.
/// 函数定义。
#[derive(Debug)]
pub struct FunctionDef {
    pub name: Ident,
    /// `None` for nullary functions. / 无参函数为 `None`。
    pub param: Option<Ident>,
    pub body: Expr,
    pub span: Span,
}

impl FunctionDef {
    pub fn new(name: Ident, param: Option<Ident>, body: Expr, span: Span) -> Self {
        Self {
            name,
            param,
            body,
            span,
        }
    }

    pub fn name(&self) -> &str {
        &self.name.name
    }

    pub fn param_name(&self) -> Option<&str> {
        self.param.as_ref().map(|p| p.name.as_str())
    }

    /// Number of parameters, zero or one.
    pub fn arity(&self) -> usize {
        usize::from(self.param.is_some())
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}): {}",
            self.name(),
            self.param_name().unwrap_or(""),
            self.body
        )
    }
}

/// A parsed library: function name to definition.
/// 解析后的函数库：函数名到定义的映射。
///
/// Built once by the parser and never modified afterwards; evaluators share
/// it behind an `Arc`. Names are unique and definition order is preserved.
#[derive(Debug, Default)]
pub struct Library {
    functions: Vec<FunctionDef>,
    index: HashMap<String, usize>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. A definition whose name is already taken is handed
    /// back unchanged.
    pub fn define(&mut self, def: FunctionDef) -> Result<(), FunctionDef> {
        if self.index.contains_key(def.name()) {
            return Err(def);
        }
        self.index.insert(def.name().to_owned(), self.functions.len());
        self.functions.push(def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.index.get(name).map(|&i| &self.functions[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Definitions in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.functions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(FunctionDef::name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, def) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{def}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExprKind;
    use pretty_assertions::assert_eq;

    fn ident(name: &str) -> Ident {
        Ident::new(name, Span::DUMMY)
    }

    fn def(name: &str, param: Option<&str>, body: Expr) -> FunctionDef {
        FunctionDef::new(ident(name), param.map(ident), body, Span::DUMMY)
    }

    #[test]
    fn test_define_and_lookup() {
        let mut library = Library::new();
        library
            .define(def("answer", None, Expr::literal(42, Span::DUMMY)))
            .unwrap();
        library
            .define(def("id", Some("n"), Expr::variable(ident("n"))))
            .unwrap();

        assert_eq!(library.len(), 2);
        assert!(library.contains("answer"));
        assert_eq!(library.get("id").unwrap().param_name(), Some("n"));
        assert_eq!(library.get("answer").unwrap().arity(), 0);
        assert!(library.get("missing").is_none());
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["answer", "id"]);
    }

    #[test]
    fn test_duplicate_is_returned() {
        let mut library = Library::new();
        library
            .define(def("f", None, Expr::literal(1, Span::DUMMY)))
            .unwrap();
        let rejected = library
            .define(def("f", Some("n"), Expr::literal(2, Span::DUMMY)))
            .unwrap_err();

        assert_eq!(rejected.param_name(), Some("n"));
        assert_eq!(library.len(), 1);
        assert!(matches!(
            library.get("f").unwrap().body.kind,
            ExprKind::Literal(1)
        ));
    }

    #[test]
    fn test_display_round_trips_source_shape() {
        let mut library = Library::new();
        let body = Expr::add(
            Expr::call(
                ident("f"),
                Some(Expr::literal(3, Span::DUMMY)),
                Span::DUMMY,
            ),
            Expr::variable(ident("x")),
        );
        library.define(def("g", Some("x"), body)).unwrap();
        library
            .define(def("h", None, Expr::call(ident("g"), None, Span::DUMMY)))
            .unwrap();

        assert_eq!(library.to_string(), "g(x): !f(3) + x\nh(): !g()");
    }

    #[test]
    fn test_visit_counters_start_at_zero() {
        let body = Expr::add(Expr::literal(1, Span::DUMMY), Expr::literal(2, Span::DUMMY));
        assert_eq!(body.visit_count(), 0);
        body.record_visit();
        assert_eq!(body.visit_count(), 1);
        assert_eq!(body.total_visits(), 1);
    }
}
