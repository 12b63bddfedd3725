//! The generation pipeline: parse, validate, emit, assemble files.

use rayon::prelude::*;
use shapegen_common::{Declaration, Input, Message, Output, OutputFile};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::emit::{EmitOptions, Emitted, Emitter};
use crate::error::Error;
use crate::ident::snake_case;
use crate::target::{FileLayout, Target};
use crate::validate::check_all;

/// Run options that are not part of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// File name for single-file layouts; the target's default when `None`.
    pub file_name: Option<String>,
    /// Prefix for source backlinks in declaration docs.
    pub locations_relative_to: Option<String>,
    /// Emit declarations on the rayon pool.
    pub parallel: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            file_name: None,
            locations_relative_to: None,
            parallel: true,
        }
    }
}

/// Parse an input document, reporting the JSON path of the first bad node.
pub fn parse_input(json: &str) -> Result<Input, Error> {
    let de = &mut serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize::<_, Input>(de).map_err(|err| Error::MalformedSchema {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Generate the files for `input`.
///
/// Every declaration is validated before anything is emitted, so a failure
/// never leaves a partial set of files. Files follow input order whether or
/// not emission ran in parallel.
pub fn generate(input: &Input, target: &dyn Target, options: &Options) -> Result<Output, Error> {
    check_all(&input.declarations)?;

    let emit_options = EmitOptions {
        locations_relative_to: options.locations_relative_to.clone(),
    };
    let emitter = Emitter::new(target, &emit_options);
    debug!(
        declarations = input.declarations.len(),
        target = target.name(),
        parallel = options.parallel,
        "Generating."
    );

    let emitted: Vec<Emitted> = if options.parallel {
        input
            .declarations
            .par_iter()
            .map(|decl| emitter.emit(decl))
            .collect::<Result<_, _>>()?
    } else {
        input
            .declarations
            .iter()
            .map(|decl| emitter.emit(decl))
            .collect::<Result<_, _>>()?
    };

    let mut warnings: Vec<Message> = Vec::new();
    let mut rendered = Vec::with_capacity(emitted.len());
    for (decl, emitted) in input.declarations.iter().zip(emitted) {
        for warning in &emitted.warnings {
            warn!(declaration = %decl.id, "{warning}");
        }
        warnings.extend(emitted.warnings);
        rendered.push(Rendered {
            decl,
            body: emitted.code.render(target.indent_unit()),
            imports: emitted.imports,
        });
    }

    let files = match target.layout() {
        FileLayout::Single { default_name } => {
            let path = options
                .file_name
                .clone()
                .unwrap_or_else(|| default_name.to_string());
            let mut file = FileParts::default();
            for part in rendered {
                file.add(part);
            }
            vec![file.assemble(target, "", path)]
        }
        FileLayout::PerDeclaration {
            default_package,
            extension,
        } => per_declaration(target, default_package, extension, rendered, &mut warnings),
    };
    info!(files = files.len(), warnings = warnings.len(), "Generated.");

    Ok(Output {
        errors: Vec::new(),
        warnings,
        files,
    })
}

/// Same as [`generate`], with failures folded into the output's `errors`.
pub fn generate_output(input: &Input, target: &dyn Target, options: &Options) -> Output {
    generate(input, target, options).unwrap_or_else(|err| Output::failed(vec![err.to_message()]))
}

/// One declaration's rendered body and the imports it needs.
#[derive(Debug)]
struct Rendered<'d> {
    decl: &'d Declaration,
    body: String,
    imports: BTreeSet<&'static str>,
}

/// Declarations collected into one output file.
#[derive(Debug, Default)]
struct FileParts {
    bodies: Vec<String>,
    imports: BTreeSet<&'static str>,
}

impl FileParts {
    fn add(&mut self, rendered: Rendered<'_>) {
        self.bodies.push(rendered.body);
        self.imports.extend(rendered.imports);
    }

    /// Prelude, then declarations separated by blank lines, ending with a newline.
    fn assemble(&self, target: &dyn Target, package: &str, path: String) -> OutputFile {
        let body = self.bodies.join("\n\n");
        let mut source = target.file_prelude(package, &self.imports).join("\n");
        if !source.is_empty() {
            source.push('\n');
        }
        source.push_str(&body);
        if !source.ends_with('\n') {
            source.push('\n');
        }
        OutputFile { path, source }
    }
}

/// One file per declaration, merged when two declarations share a path.
fn per_declaration(
    target: &dyn Target,
    default_package: &str,
    extension: &str,
    rendered: Vec<Rendered<'_>>,
    warnings: &mut Vec<Message>,
) -> Vec<OutputFile> {
    let mut grouped: Vec<(String, String, FileParts)> = Vec::new();
    for part in rendered {
        let decl = part.decl;
        let package = decl
            .attrs
            .codegen_attr("package")
            .unwrap_or(default_package)
            .to_string();
        let path = format!("{package}/{}_gen.{extension}", snake_case(&decl.id));
        match grouped.iter_mut().find(|(existing, _, _)| *existing == path) {
            Some((_, _, file)) => {
                warn!(%path, declaration = %decl.id, "Declarations share a file.");
                warnings.push(
                    Message::new(format!("`{}` shares the file {path}", decl.id))
                        .with_label(format!("`{}` declared here", decl.id), decl.id_location.clone()),
                );
                file.add(part);
            }
            None => {
                let mut file = FileParts::default();
                file.add(part);
                grouped.push((path, package, file));
            }
        }
    }
    grouped
        .into_iter()
        .map(|(path, package, file)| file.assemble(target, &package, path))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::target::lookup;
    use shapegen_common::LocationId;

    const POINT: &str = r#"{
        "declarations": [{
            "id": "Point",
            "id_location": "L(src/geo.rs:1 #B0-B5)",
            "container_kind": {"Struct": {"fields": [
                {"id": "x", "id_location": "x", "format": "F64"},
                {"id": "y", "id_location": "y", "format": "F64"}
            ]}}
        }]
    }"#;

    #[test]
    fn test_parse_reports_path() {
        let err = parse_input(r#"{"declarations": [{"id": 5}]}"#).unwrap_err();
        let Error::MalformedSchema { path, .. } = err else {
            unreachable!("unexpected error kind");
        };
        assert_eq!(path, "declarations[0].id");
    }

    #[test]
    fn test_single_file_default_name() {
        let input = parse_input(POINT).unwrap();
        let output = generate(&input, lookup("typescript").unwrap(), &Options::default()).unwrap();
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.files[0].path, "types.ts");
        assert!(output.files[0].source.ends_with('\n'));
        assert!(output.files[0].source.contains("export type Point = {"));
    }

    #[test]
    fn test_file_name_override() {
        let input = parse_input(POINT).unwrap();
        let options = Options {
            file_name: Some("models.ts".to_string()),
            ..Options::default()
        };
        let output = generate(&input, lookup("typescript").unwrap(), &options).unwrap();
        assert_eq!(output.files[0].path, "models.ts");
    }

    #[test]
    fn test_go_file_per_declaration() {
        let input = parse_input(POINT).unwrap();
        let output = generate(&input, lookup("go").unwrap(), &Options::default()).unwrap();
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.files[0].path, "generated/point_gen.go");
        assert!(output.files[0].source.starts_with("// Code generated by shapegen."));
        assert!(output.files[0].source.contains("package generated\n"));
    }

    #[test]
    fn test_empty_input_single_file() {
        let input = Input::default();
        let output = generate(&input, lookup("typescript").unwrap(), &Options::default()).unwrap();
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.files[0].source, "\n");

        let output = generate(&input, lookup("go").unwrap(), &Options::default()).unwrap();
        assert!(output.files.is_empty());
    }

    #[test]
    fn test_shared_go_path_is_reported() {
        let input = parse_input(
            r#"{"declarations": [
                {"id": "UserId", "id_location": "a", "container_kind": {"NewTypeStruct": "U64"}},
                {"id": "user_id", "id_location": "b", "container_kind": "UnitStruct"}
            ]}"#,
        )
        .unwrap();
        let output = generate(&input, lookup("go").unwrap(), &Options::default()).unwrap();
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.warnings.len(), 1);
        let warning = &output.warnings[0];
        assert_eq!(warning.message, "`user_id` shares the file generated/user_id_gen.go");
        assert_eq!(warning.labels[0].1, LocationId::new("b"));
    }

    #[test]
    fn test_big_import_follows_types_not_text() {
        let input = parse_input(
            r#"{"declarations": [
                {"id": "Amount", "id_location": "a", "rust_docs": " Stored like a big.Int upstream.",
                 "container_kind": {"Struct": {"fields": [
                    {"id": "v", "id_location": "v", "format": "U64"}
                 ]}}},
                {"id": "Supply", "id_location": "s", "container_kind": {"NewTypeStruct": "U128"}}
            ]}"#,
        )
        .unwrap();
        let output = generate(&input, lookup("go").unwrap(), &Options::default()).unwrap();
        let amount = &output.files[0].source;
        assert!(amount.contains("// Stored like a big.Int upstream."));
        assert!(!amount.contains("import"));
        assert!(output.files[1].source.contains("package generated\n\nimport \"math/big\"\n"));
    }

    #[test]
    fn test_generate_output_folds_errors() {
        let input = parse_input(
            r#"{"declarations": [{
                "id": "E",
                "id_location": "e",
                "container_kind": {"Enum": {"repr": "Untagged", "variants": []}}
            }]}"#,
        )
        .unwrap();
        let output = generate_output(&input, lookup("typescript").unwrap(), &Options::default());
        assert!(!output.is_success());
        assert!(output.files.is_empty());
        assert_eq!(output.errors.len(), 1);
    }
}
