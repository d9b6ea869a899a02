pub mod extractor;
pub mod loader;
pub mod model;
pub mod scanner;
pub mod synthesizer;
pub mod tokens;
pub mod util;

pub use extractor::{extract_module, extract_signatures};
pub use loader::{load_module, module_id, LoadObserver, ModuleSource, NoopObserver};
pub use model::{FunctionSignature, GeneratedArtifact, ModuleSignatureSet, Qualifier, Variant};
pub use scanner::{discover_sources, scan_project, write_json, GenerateConfig};
pub use synthesizer::{forward_call, generate_all, synthesize};
