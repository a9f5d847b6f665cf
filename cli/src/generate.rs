#![deny(missing_docs)]

//! # Generate Command
//!
//! Loads endpoint definition files, runs every definition through the
//! converter and writes the resulting OpenAPI document.

use routedoc_core::error::{AppError, AppResult};
use routedoc_core::{
    parse_definitions, ApiInfo, ComponentNamer, ContentHashNamer, DefinitionConverter,
    DefinitionFormat, EndpointDefinition, RandomCodeNamer, SpecificationDocument,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// How component names are chosen.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Naming {
    /// `Req`/`Res` plus a random 13-character code per endpoint.
    #[default]
    Random,
    /// `Req`/`Res` plus a hash of the payload shape; identical shapes share components.
    ContentHash,
}

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Definition file, or a directory searched recursively for .json/.yaml/.yml files.
    #[clap(long, env = "ROUTEDOC_INPUT")]
    pub input: PathBuf,

    /// Output path for the document.
    /// Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long, env = "ROUTEDOC_OUTPUT")]
    pub output: Option<PathBuf>,

    /// API title written to `info.title`.
    #[clap(long, env = "ROUTEDOC_TITLE", default_value = "API")]
    pub title: String,

    /// API version written to `info.version`.
    #[clap(long, env = "ROUTEDOC_API_VERSION", default_value = "1.0.0")]
    pub api_version: String,

    /// Optional API description.
    #[clap(long, env = "ROUTEDOC_DESCRIPTION")]
    pub description: Option<String>,

    /// Server URL; may be repeated.
    #[clap(long = "server", env = "ROUTEDOC_SERVERS", value_delimiter = ',')]
    pub servers: Vec<String>,

    /// Component naming strategy.
    #[clap(long, value_enum, env = "ROUTEDOC_NAMING", default_value_t = Naming::Random)]
    pub naming: Naming,

    /// Seed for random component names, for reproducible output.
    #[clap(long, env = "ROUTEDOC_SEED")]
    pub seed: Option<u64>,

    /// Check that the document converts into the typed OpenAPI model before writing.
    #[clap(long, env = "ROUTEDOC_VERIFY")]
    pub verify: bool,
}

impl GenerateArgs {
    fn info(&self) -> ApiInfo {
        let mut info = ApiInfo::new(&self.title, &self.api_version);
        if let Some(desc) = &self.description {
            info = info.with_description(desc);
        }
        for server in &self.servers {
            info = info.with_server(server);
        }
        info
    }
}

/// Executes the generation.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &GenerateArgs) -> AppResult<()> {
    let mut definitions = load_definitions(&args.input)?;
    info!(count = definitions.len(), "loaded endpoint definitions");

    let document = SpecificationDocument::new(args.info())?;
    let document = match args.naming {
        Naming::Random => {
            let namer = args
                .seed
                .map(RandomCodeNamer::seeded)
                .unwrap_or_default();
            convert(document, namer, &mut definitions)?
        }
        Naming::ContentHash => convert(document, ContentHashNamer, &mut definitions)?,
    };

    if args.verify {
        document.to_openapi()?;
        debug!("document matches the typed OpenAPI model");
    }

    let rendered = match args.output.as_deref().and_then(DefinitionFormat::from_path) {
        Some(DefinitionFormat::Yaml) => document.to_yaml_string()?,
        _ => document.to_json_string()?,
    };

    if let Some(out_path) = &args.output {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::General(format!("Failed to create output directory: {}", e))
                })?;
            }
        }
        fs::write(out_path, rendered)
            .map_err(|e| AppError::General(format!("Failed to write output file: {}", e)))?;
        info!(
            path = %out_path.display(),
            paths = document.paths().len(),
            components = document.components().len(),
            "OpenAPI document written"
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn convert<N: ComponentNamer>(
    document: SpecificationDocument,
    namer: N,
    definitions: &mut [EndpointDefinition],
) -> AppResult<SpecificationDocument> {
    let mut converter = DefinitionConverter::with_namer(document, namer);
    converter.process_all(definitions.iter_mut())?;
    Ok(converter.into_document())
}

/// Reads definitions from a file, or from every definition file under a directory.
///
/// Directory entries are processed in path order so output is stable.
pub fn load_definitions(input: &Path) -> AppResult<Vec<EndpointDefinition>> {
    if !input.exists() {
        return Err(AppError::General(format!("Input not found: {:?}", input)));
    }

    if input.is_file() {
        let format = DefinitionFormat::from_path(input).ok_or_else(|| {
            AppError::General(format!("Unsupported definition file extension: {:?}", input))
        })?;
        return read_file(input, format);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry =
            entry.map_err(|e| AppError::General(format!("Failed to walk {:?}: {}", input, e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(format) = DefinitionFormat::from_path(entry.path()) {
            files.push((entry.into_path(), format));
        }
    }

    let mut definitions = Vec::new();
    for (path, format) in files {
        definitions.extend(read_file(&path, format)?);
    }
    Ok(definitions)
}

fn read_file(path: &Path, format: DefinitionFormat) -> AppResult<Vec<EndpointDefinition>> {
    debug!(path = %path.display(), "reading definitions");
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::General(format!("Failed to read {:?}: {}", path, e)))?;
    parse_definitions(&content, format).map_err(|e| match e {
        AppError::InvalidDefinition(msg) => {
            AppError::InvalidDefinition(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const WIDGETS: &str = r#"
- url: /widgets
  methods: [GET, POST]
  rr_type: PAGINATED_LIST
  response_obj:
    type: object
    properties:
      name: { type: string }
  query_param:
    - [page, integer]
  tags: [widgets]
"#;

    const UPLOADS: &str = r#"[
  {
    "url": "/widgets/{id}/image",
    "methods": ["PUT"],
    "rr_type": "BINARY_UPLOAD",
    "request_body": { "type": "object" },
    "path_params": [["id", "uuid", true]],
    "only_message": true
  }
]"#;

    fn args(input: PathBuf, output: Option<PathBuf>) -> GenerateArgs {
        GenerateArgs {
            input,
            output,
            title: "Widgets".to_string(),
            api_version: "2.1.0".to_string(),
            description: None,
            servers: vec!["https://api.example.com".to_string()],
            naming: Naming::Random,
            seed: Some(7),
            verify: true,
        }
    }

    #[test]
    fn test_generate_yaml_from_directory() {
        let dir = tempdir().unwrap();
        let defs = dir.path().join("defs");
        fs::create_dir_all(defs.join("nested")).unwrap();
        fs::write(defs.join("a_widgets.yaml"), WIDGETS).unwrap();
        fs::write(defs.join("nested").join("uploads.json"), UPLOADS).unwrap();
        fs::write(defs.join("notes.txt"), "ignored").unwrap();
        let out_path = dir.path().join("out").join("openapi.yaml");

        execute(&args(defs, Some(out_path.clone()))).unwrap();

        let yaml = fs::read_to_string(&out_path).unwrap();
        let doc: serde_json::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(doc["info"]["title"], "Widgets");
        assert_eq!(doc["info"]["version"], "2.1.0");
        assert_eq!(doc["servers"][0]["url"], "https://api.example.com");
        assert!(doc["paths"]["/widgets"]["get"].is_object());
        assert!(doc["paths"]["/widgets"]["post"].is_object());
        assert!(doc["paths"]["/widgets/{id}/image"]["put"]["requestBody"]["content"]
            ["multipart/form-data"]
            .is_object());
        // two defaults, one paginated response, one raw upload request
        assert_eq!(doc["components"]["schemas"].as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_generate_json_is_reproducible_with_seed() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("widgets.yml");
        fs::write(&input, WIDGETS).unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");

        execute(&args(input.clone(), Some(first.clone()))).unwrap();
        execute(&args(input, Some(second.clone()))).unwrap();

        let a = fs::read_to_string(first).unwrap();
        let b = fs::read_to_string(second).unwrap();
        assert!(a.contains("\"openapi\": \"3.1.0\""));
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_hash_naming() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("widgets.yaml");
        fs::write(&input, WIDGETS).unwrap();
        let out = dir.path().join("openapi.json");

        let mut a = args(input, Some(out.clone()));
        a.naming = Naming::ContentHash;
        a.seed = None;
        execute(&a).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        let names: Vec<_> = doc["components"]["schemas"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert!(names.iter().any(|n| n.starts_with("Res")));
    }

    #[test]
    fn test_verify_accepts_operations_without_responses() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("forms.yaml");
        let yaml = r#"
- url: /w/{id}
  methods: [get, PUT, delete]
  rr_type: POST_FORM
  request_body: { type: object }
  path_params: [[id]]
- url: /e
  methods: [get]
"#;
        fs::write(&input, yaml).unwrap();
        let out = dir.path().join("openapi.json");

        execute(&args(input, Some(out.clone()))).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(doc["paths"]["/e"]["get"], serde_json::json!({}));
        assert!(doc["paths"]["/w/{id}"]["put"].get("responses").is_none());
        assert!(doc["paths"]["/w/{id}"]["put"]["requestBody"]["content"]
            ["application/x-www-form-urlencoded"]
            .is_object());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir().unwrap();
        let result = execute(&args(dir.path().join("missing.yaml"), None));
        match result {
            Err(AppError::General(msg)) => assert!(msg.contains("Input not found")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_definition_names_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.yaml");
        fs::write(&input, "- url: /x\n  methods: [FETCH]\n").unwrap();

        match execute(&args(input, None)) {
            Err(AppError::InvalidDefinition(msg)) => assert!(msg.contains("bad.yaml"), "{msg}"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
