use crate::facade::util::{argument_names, compact_whitespace, normalize_parameters};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Qualifier {
    Async,
}

impl Qualifier {
    pub fn keyword(&self) -> &'static str {
        match self {
            Qualifier::Async => "async",
        }
    }
}

/// One public free function recovered from source text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub qualifier: Option<Qualifier>,
    /// Identifier, possibly with a single generic suffix such as `parse<T>`.
    pub name: String,
    /// Normalized parameter list including the parentheses.
    pub parameters: String,
    pub return_type: Option<String>,
}

impl FunctionSignature {
    pub fn new(
        qualifier: Option<Qualifier>,
        name: &str,
        parameters: &str,
        return_type: Option<&str>,
    ) -> Self {
        Self {
            qualifier,
            name: name.trim().to_string(),
            parameters: normalize_parameters(parameters),
            return_type: return_type
                .map(compact_whitespace)
                .filter(|ret| !ret.is_empty()),
        }
    }

    pub fn is_async(&self) -> bool {
        self.qualifier == Some(Qualifier::Async)
    }

    pub fn variant(&self) -> Variant {
        Variant::of(self)
    }

    pub fn base_name(&self) -> &str {
        self.name.split('<').next().unwrap_or(&self.name)
    }

    pub fn generic(&self) -> Option<&str> {
        let (_, rest) = self.name.split_once('<')?;
        rest.strip_suffix('>')
    }

    /// The callable path: `name` or `name::<T>`.
    pub fn call_path(&self) -> String {
        match self.generic() {
            Some(generic) => format!("{}::<{}>", self.base_name(), generic),
            None => self.name.clone(),
        }
    }

    pub fn argument_names(&self) -> Vec<String> {
        argument_names(&self.parameters)
    }

    /// `async fn name(params) -> Ret`, without a terminator.
    pub fn declaration(&self) -> String {
        let qualifier = self
            .qualifier
            .map(|q| format!("{} ", q.keyword()))
            .unwrap_or_default();
        format!("{}fn {}", qualifier, self)
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.parameters)?;
        if let Some(ret) = &self.return_type {
            write!(f, " -> {}", ret)?;
        }
        Ok(())
    }
}

/// Signatures found in one source file, in declaration order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ModuleSignatureSet {
    pub module_id: Option<String>,
    pub signatures: Vec<FunctionSignature>,
}

impl ModuleSignatureSet {
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// `module::`, or nothing for a module without an identifier.
    pub fn path_prefix(&self) -> String {
        self.module_id
            .as_deref()
            .map(|id| format!("{}::", id))
            .unwrap_or_default()
    }

    pub fn signatures_for(&self, variant: Variant) -> impl Iterator<Item = &FunctionSignature> {
        self.signatures
            .iter()
            .filter(move |sig| Variant::of(sig) == variant)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Sync,
    Async,
}

impl Variant {
    /// Output order: the asynchronous pair is emitted first.
    pub const ALL: [Variant; 2] = [Variant::Async, Variant::Sync];

    pub fn of(sig: &FunctionSignature) -> Self {
        if sig.is_async() {
            Variant::Async
        } else {
            Variant::Sync
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Sync => write!(f, "sync"),
            Variant::Async => write!(f, "async"),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub variant: Variant,
    pub interface_name: String,
    pub interface: String,
    pub implementation: String,
}

impl GeneratedArtifact {
    pub fn render(&self) -> String {
        format!("{}\n{}", self.interface, self.implementation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_parameters_and_return_type() {
        let sig = FunctionSignature::new(None, " area ", "(w:f64,\n h: f64,)", Some(" f64 "));
        assert_eq!(sig.name, "area");
        assert_eq!(sig.parameters, "(w: f64, h: f64)");
        assert_eq!(sig.return_type.as_deref(), Some("f64"));
        assert_eq!(sig.to_string(), "area(w: f64, h: f64) -> f64");
    }

    #[test]
    fn declaration_carries_the_qualifier() {
        let sig = FunctionSignature::new(Some(Qualifier::Async), "draw", "(id: u32)", None);
        assert_eq!(sig.declaration(), "async fn draw(id: u32)");
        assert_eq!(sig.variant(), Variant::Async);
    }

    #[test]
    fn generic_names_split_into_base_and_parameter() {
        let sig = FunctionSignature::new(None, "parse<T>", "(s: &str)", Some("T"));
        assert_eq!(sig.base_name(), "parse");
        assert_eq!(sig.generic(), Some("T"));
        assert_eq!(sig.call_path(), "parse::<T>");

        let plain = FunctionSignature::new(None, "parse", "()", None);
        assert_eq!(plain.generic(), None);
        assert_eq!(plain.call_path(), "parse");
    }

    #[test]
    fn module_sets_filter_by_variant() {
        let set = ModuleSignatureSet {
            module_id: Some("io".into()),
            signatures: vec![
                FunctionSignature::new(None, "a", "()", None),
                FunctionSignature::new(Some(Qualifier::Async), "b", "()", None),
                FunctionSignature::new(None, "c", "()", None),
            ],
        };
        let sync: Vec<_> = set.signatures_for(Variant::Sync).map(|s| s.name.as_str()).collect();
        let asyncs: Vec<_> = set.signatures_for(Variant::Async).map(|s| s.name.as_str()).collect();
        assert_eq!(sync, vec!["a", "c"]);
        assert_eq!(asyncs, vec!["b"]);
        assert_eq!(set.path_prefix(), "io::");
    }

    #[test]
    fn signatures_serialize_to_json() {
        let sig = FunctionSignature::new(Some(Qualifier::Async), "draw", "(id: u32)", None);
        let json = serde_json::to_value(&sig).unwrap();
        assert_eq!(json["qualifier"], "async");
        assert_eq!(json["parameters"], "(id: u32)");
        assert!(json["return_type"].is_null());
    }
}
