//! Module and visibility inference from function names
//!
//! Firmware functions follow the `PREFIX_FunctionName` convention: the text
//! before the first underscore names the owning module, and a lower-case
//! function name marks a file-local (private) helper. These are naming
//! heuristics only; no C source is inspected.

/// Module bucket for labels without any underscore (kernel/global functions).
pub const RTOS_PREFIX: &str = "RTOS";

/// Module prefix of a label.
///
/// - no underscore: [`RTOS_PREFIX`]
/// - otherwise: everything before the first underscore, which is the empty
///   string when the label starts with `_`
pub fn module_prefix(label: &str) -> String {
    match label.split_once('_') {
        None => RTOS_PREFIX.to_string(),
        Some((prefix, _)) => prefix.to_string(),
    }
}

/// Whether a label names a public function.
///
/// - no underscore: public (RTOS bucket)
/// - leading underscore: public
/// - otherwise the first segment after the prefix separator decides: it is
///   private iff its first character is lower-case; an empty segment
///   (`BAL__x`, `BAL_`) counts as public
pub fn is_public(label: &str) -> bool {
    if label.starts_with('_') {
        return true;
    }
    let Some((_, rest)) = label.split_once('_') else {
        return true;
    };
    let function_name = rest.split('_').next().unwrap_or_default();
    match function_name.chars().next() {
        Some(first) => !first.is_lowercase(),
        None => true,
    }
}

/// Whether a label names the function a digraph was generated for.
pub fn is_root(label: &str, graph_name: Option<&str>) -> bool {
    graph_name == Some(label)
}
