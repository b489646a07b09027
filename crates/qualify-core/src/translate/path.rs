use crate::{
    error::TranslateError,
    expr::{Expr, OpName, OpNode},
};
use qualify_schema::{catalog::Catalog, node::Attribute};

///
/// ResolvedPath
///
/// Attribute path resolved against the catalog, segment by segment, from
/// the class a row is evaluated in. Never empty.
///

#[derive(Debug)]
pub(crate) struct ResolvedPath {
    prefix: Vec<Attribute>,
    terminal: Attribute,
}

impl ResolvedPath {
    pub(crate) const fn terminal(&self) -> &Attribute {
        &self.terminal
    }

    /// Class reached by the terminal attribute, when it is reference-like.
    pub(crate) fn target_class(&self) -> Option<&str> {
        if self.terminal.is_reference() {
            self.terminal.referenced_class.as_deref()
        } else {
            None
        }
    }

    pub(crate) fn to_many_segments(&self) -> usize {
        self.iter().filter(|attr| attr.is_to_many()).count()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.prefix.iter().chain(std::iter::once(&self.terminal))
    }

    pub(crate) fn attributes(&self) -> Vec<Attribute> {
        self.iter().cloned().collect()
    }

    /// `nav(P)`: the first attribute, then one `.` step per further segment.
    pub(crate) fn chain(&self) -> Expr {
        let first = self.prefix.first().unwrap_or(&self.terminal);

        self.iter()
            .skip(1)
            .fold(Expr::attr(&first.query_name), |base, attr| {
                Expr::navigate(base, &attr.query_name)
            })
    }
}

/// Resolve `names` one segment at a time. Every segment except the last must
/// be reference-like; navigation continues in its referenced class.
pub(crate) fn resolve_names<'n>(
    catalog: &Catalog,
    class: &str,
    names: impl IntoIterator<Item = &'n str>,
) -> Result<ResolvedPath, TranslateError> {
    let mut current = class.to_string();
    let mut resolved: Vec<Attribute> = Vec::new();

    for name in names {
        if let Some(previous) = resolved.last() {
            current = navigable_class(previous)?.to_string();
        }

        let attr = catalog
            .resolve(&current, name)
            .map_err(|_| TranslateError::unresolved(&current, name))?;
        resolved.push(attr);
    }

    let terminal = resolved
        .pop()
        .ok_or_else(|| TranslateError::invalid_row("attribute path is empty"))?;

    Ok(ResolvedPath {
        prefix: resolved,
        terminal,
    })
}

/// Resolve a row's stored path and require each stored attribute to match
/// its catalog declaration.
pub(crate) fn resolve_row_path(
    catalog: &Catalog,
    class: &str,
    path: &[Attribute],
) -> Result<ResolvedPath, TranslateError> {
    if path.is_empty() {
        return Err(TranslateError::invalid_row(format!(
            "row on '{class}' has no attribute path"
        )));
    }

    let resolved = resolve_names(catalog, class, path.iter().map(|a| a.query_name.as_str()))?;

    if let Some((stored, _)) = path
        .iter()
        .zip(resolved.iter())
        .find(|(stored, declared)| stored != declared)
    {
        return Err(TranslateError::invalid_row(format!(
            "attribute '{}' does not match its catalog declaration",
            stored.query_name
        )));
    }

    Ok(resolved)
}

/// Attribute names of a `.`-nested navigation chain, first segment first.
pub(crate) fn unchain(expr: &Expr) -> Result<Vec<&str>, TranslateError> {
    let mut names = Vec::new();
    let mut cursor = expr;

    loop {
        match cursor {
            Expr::Attr(attr) => {
                names.push(attr.name.as_str());
                break;
            }
            Expr::Op(OpNode {
                name: OpName::Navigate,
                operands,
            }) => match operands.as_slice() {
                [base, Expr::Attr(attr)] => {
                    names.push(attr.name.as_str());
                    cursor = base;
                }
                _ => {
                    return Err(TranslateError::shape(format!(
                        "'.' takes a chain and an attribute, found {cursor}"
                    )));
                }
            },
            other => {
                return Err(TranslateError::shape(format!(
                    "expected a navigation chain, found {other}"
                )));
            }
        }
    }

    names.reverse();

    Ok(names)
}

fn navigable_class(attr: &Attribute) -> Result<&str, TranslateError> {
    match attr.referenced_class.as_deref() {
        Some(class) if attr.is_reference() => Ok(class),
        _ => Err(TranslateError::invalid_row(format!(
            "cannot navigate through '{}' of type {}",
            attr.query_name, attr.ty
        ))),
    }
}
