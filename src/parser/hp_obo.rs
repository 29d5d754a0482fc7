use std::fs;
use std::path::Path;

use tracing::{debug, error, trace, warn};

use crate::{Phenotype, PhenotypeGraph, VibeError, VibeResult};

type Connections = Vec<(Phenotype, Phenotype)>;

/// Reads an `hp.obo` file and builds the `is_a` graph of all terms
///
/// Only `[Term]` stanzas are considered. Obsolete terms and terms outside
/// of the HPO namespace are skipped.
///
/// # Errors
///
/// - [`VibeError::CannotOpenFile`]: the file cannot be read
/// - [`VibeError::InvalidInput`]: an `id` or `is_a` line is malformed
pub fn read_obo_file<P: AsRef<Path>>(filename: P) -> VibeResult<PhenotypeGraph> {
    let filename = filename.as_ref();
    let content = fs::read_to_string(filename).map_err(|_| {
        error!("Unable to read {}", filename.display());
        VibeError::CannotOpenFile(filename.display().to_string())
    })?;
    let graph = parse_obo(&content)?;
    debug!("Loaded {} terms from {}", graph.len(), filename.display());
    Ok(graph)
}

/// Builds the `is_a` graph from the content of an `hp.obo` file
///
/// # Errors
///
/// [`VibeError::InvalidInput`]: an `id` or `is_a` line is malformed
///
/// # Examples
///
/// ```
/// use vibe::parser::hp_obo::parse_obo;
/// use vibe::{OntologyGraph, Phenotype};
///
/// let obo = "format-version: 1.2\n\n\
///     [Term]\nid: HP:0000001\nname: All\n\n\
///     [Term]\nid: HP:0000118\nname: Phenotypic abnormality\nis_a: HP:0000001 ! All\n";
///
/// let graph = parse_obo(obo).unwrap();
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.children(&Phenotype::from(1u32)), &[Phenotype::from(118u32)]);
/// ```
pub fn parse_obo(content: &str) -> VibeResult<PhenotypeGraph> {
    let content = content.replace("\r\n", "\n");
    // stores tuples of Term - Parent
    let mut connections: Connections = Vec::new();
    let mut graph = PhenotypeGraph::default();

    for stanza in content.split("\n\n") {
        let Some(term) = stanza.trim_start().strip_prefix("[Term]\n") else {
            trace!("Ignoring: {}", stanza);
            continue;
        };
        let Some(id) = term_id(term)? else {
            continue;
        };
        graph.insert_term(id);
        add_connections(&mut connections, term, id)?;
    }

    for (child, parent) in connections {
        graph.add_parent(parent, child);
    }

    Ok(graph)
}

/// Returns the id of the term or `None` if the term should be skipped
fn term_id(term: &str) -> VibeResult<Option<Phenotype>> {
    let mut id: Option<&str> = None;
    for line in term.lines() {
        match line.split_once(": ") {
            Some(("id", value)) => id = Some(value.trim()),
            Some(("is_obsolete", "true")) => {
                trace!("Skipping obsolete term {:?}", id);
                return Ok(None);
            }
            _ => (),
        }
    }

    let Some(id) = id else {
        warn!("Term without id: {}", term);
        return Ok(None);
    };

    if !id.starts_with("HP:") {
        trace!("Skipping non-HPO term {}", id);
        return Ok(None);
    }
    Phenotype::try_from(id)
        .map(Some)
        .map_err(|_| VibeError::InvalidInput(format!("invalid term id: {id}")))
}

fn add_connections(connections: &mut Connections, term: &str, id: Phenotype) -> VibeResult<()> {
    for line in term.lines() {
        if let Some(value) = line.strip_prefix("is_a: ") {
            let parent = value.split_once(' ').map_or(value, |(parent, _)| parent).trim();
            match Phenotype::try_from(parent) {
                Ok(parent) => connections.push((id, parent)),
                Err(_) => {
                    error!("Unable to parse HPO ID from {}", value);
                    return Err(VibeError::InvalidInput(line.to_string()));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::OntologyGraph;

    const SMALL: &str = "format-version: 1.2
data-version: hp/releases/2023-01-27

[Term]
id: HP:0000217
name: Xerostomia

[Term]
id: HP:0000218
name: High palate
is_a: HP:0000217 ! Xerostomia

[Term]
id: HP:0000219
name: Thin upper lip vermilion
is_a: HP:0000217 ! Xerostomia
is_a: HP:0000218 ! High palate

[Term]
id: HP:0000220
name: obsolete Velopharyngeal insufficiency
is_obsolete: true

[Typedef]
id: part_of
name: part of
";

    #[test]
    fn split_terms() {
        let graph = parse_obo(SMALL).unwrap();

        assert_eq!(graph.len(), 3);
        assert!(!graph.contains(&220u32.into()));
        assert_eq!(graph.parents(&219u32.into()).len(), 2);
        assert_eq!(graph.parents(&218u32.into()).len(), 1);
        assert_eq!(graph.parents(&217u32.into()).len(), 0);
        assert_eq!(graph.children(&217u32.into()).len(), 2);
    }

    #[test]
    fn windows_line_endings() {
        let graph = parse_obo(&SMALL.replace('\n', "\r\n")).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.parents(&219u32.into()).len(), 2);
    }

    #[test]
    fn invalid_parent() {
        let obo = "[Term]\nid: HP:0000002\nis_a: HP:12 ! broken\n";
        assert!(matches!(parse_obo(obo), Err(VibeError::InvalidInput(_))));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_obo_file("/does/not/exist/hp.obo"),
            Err(VibeError::CannotOpenFile(_))
        ));
    }
}
