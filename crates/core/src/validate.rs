//! Checks that run before anything is emitted.

use shapegen_common::{ContainerShape, Declaration, EnumRepresentation};

use crate::error::Error;

/// Reject declarations the emitters cannot express.
///
/// Only externally tagged enums are supported; everything else is accepted.
pub fn check_declaration(decl: &Declaration) -> Result<(), Error> {
    let ContainerShape::Enum { repr, .. } = &decl.container_kind else {
        return Ok(());
    };

    let mut labels = vec![("enum declared here".to_string(), decl.id_location.clone())];
    match repr {
        EnumRepresentation::External => return Ok(()),
        EnumRepresentation::Untagged => {}
        EnumRepresentation::Tagged {
            tag,
            tag_location,
            content,
            content_location,
        } => {
            labels.push((format!("tag field `{tag}`"), tag_location.clone()));
            if let (Some(content), Some(location)) = (content, content_location) {
                labels.push((format!("content field `{content}`"), location.clone()));
            }
        }
    }

    Err(Error::UnsupportedRepresentation {
        declaration: decl.id.clone(),
        representation: repr.label(),
        labels,
    })
}

/// Validate every declaration, stopping at the first failure.
pub fn check_all(declarations: &[Declaration]) -> Result<(), Error> {
    declarations.iter().try_for_each(check_declaration)
}
