use crate::facade::model::{FunctionSignature, GeneratedArtifact, ModuleSignatureSet, Variant};
use crate::facade::scanner::GenerateConfig;

/// Emits the trait declaring every `variant` signature and an impl for
/// `impl_target` that forwards each method to its module's free function.
pub fn synthesize(
    interface_name: &str,
    impl_target: &str,
    modules: &[ModuleSignatureSet],
    variant: Variant,
) -> GeneratedArtifact {
    let mut interface = vec![format!("pub trait {} {{", interface_name)];
    for (_, sig) in selected(modules, variant) {
        interface.push(format!("    {};", sig.declaration()));
    }
    interface.push("}".to_string());

    let mut implementation = vec![format!("impl {} for {} {{", interface_name, impl_target)];
    for (module, sig) in selected(modules, variant) {
        implementation.push(format!("    {}", sig.declaration()));
        implementation.push("    {".to_string());
        implementation.push(format!("        {}", forward_call(module, sig)));
        implementation.push("    }".to_string());
    }
    implementation.push("}".to_string());

    GeneratedArtifact {
        variant,
        interface_name: interface_name.to_string(),
        interface: interface.join("\n"),
        implementation: implementation.join("\n"),
    }
}

/// `module::name(a,b)`, `module::name::<T>(a)` or `module::name(a).await`.
pub fn forward_call(module: &ModuleSignatureSet, sig: &FunctionSignature) -> String {
    let suspend = if sig.is_async() { ".await" } else { "" };
    format!(
        "{}{}({}){}",
        module.path_prefix(),
        sig.call_path(),
        sig.argument_names().join(","),
        suspend
    )
}

/// One artifact per requested variant, named after `cfg`.
pub fn generate_all(
    cfg: &GenerateConfig,
    modules: &[ModuleSignatureSet],
    variants: &[Variant],
) -> Vec<GeneratedArtifact> {
    variants
        .iter()
        .map(|&variant| {
            synthesize(
                &cfg.interface_name(variant),
                &cfg.impl_target,
                modules,
                variant,
            )
        })
        .collect()
}

fn selected(
    modules: &[ModuleSignatureSet],
    variant: Variant,
) -> impl Iterator<Item = (&ModuleSignatureSet, &FunctionSignature)> {
    modules
        .iter()
        .flat_map(move |m| m.signatures_for(variant).map(move |sig| (m, sig)))
}
