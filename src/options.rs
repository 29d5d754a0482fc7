//! Validated settings of a `vibe` run
//!
//! [`OptionsBuilder`] receives the raw values, e.g. from the command line,
//! and validates all of them at once. Every problem is collected and
//! reported in a single [`VibeError::Config`].

use std::path::{Path, PathBuf};

use tracing::{error, warn};

use crate::ontology::PhenotypeGroup;
use crate::output::OutputFormat;
use crate::prioritize::Strategy;
use crate::{OntologyAlgorithm, Phenotype, VibeError, VibeResult};

/// The operation of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Nothing to do, e.g. only the help was requested
    #[default]
    None,
    /// Retrieve and prioritize the genes associated to a set of phenotypes
    GenesForPhenotypes,
}

/// The validated settings of a run
///
/// Use [`OptionsBuilder`] to construct it.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    run_mode: RunMode,
    phenotypes: PhenotypeGroup,
    ontology: Option<PathBuf>,
    algorithm: Option<OntologyAlgorithm>,
    dataset: Option<PathBuf>,
    output: Option<PathBuf>,
    strategy: Strategy,
    output_format: OutputFormat,
}

impl RunOptions {
    /// The operation of the run
    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    /// The seed phenotypes
    pub fn phenotypes(&self) -> &PhenotypeGroup {
        &self.phenotypes
    }

    /// The `hp.obo` file and the algorithm to expand the seed phenotypes
    ///
    /// `None` if the phenotypes are used without expansion
    pub fn expansion(&self) -> Option<(&Path, OntologyAlgorithm)> {
        match (&self.ontology, self.algorithm) {
            (Some(ontology), Some(algorithm)) => Some((ontology.as_path(), algorithm)),
            _ => None,
        }
    }

    /// The directory of the dataset
    pub fn dataset(&self) -> Option<&Path> {
        self.dataset.as_deref()
    }

    /// The output file
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// The prioritization strategy
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The layout of the output file
    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}

/// Collects the raw settings of a run and validates them
///
/// # Examples
///
/// ```
/// use vibe::options::{OptionsBuilder, RunMode};
/// use vibe::VibeError;
///
/// let mut builder = OptionsBuilder::new(RunMode::GenesForPhenotypes);
/// builder.add_phenotype("hp:0000123");
/// builder.set_algorithm("distance");
///
/// // no dataset, no output file, no ontology file and no maximum distance
/// match builder.build() {
///     Err(VibeError::Config(errors)) => assert_eq!(errors.len(), 4),
///     _ => panic!("invalid options must not build"),
/// }
/// ```
#[derive(Debug, Default)]
pub struct OptionsBuilder {
    run_mode: RunMode,
    phenotypes: Vec<String>,
    ontology: Option<PathBuf>,
    algorithm: Option<String>,
    max_distance: Option<String>,
    dataset: Option<PathBuf>,
    output: Option<PathBuf>,
    strategy: Option<String>,
    output_format: OutputFormat,
}

impl OptionsBuilder {
    /// Constructs a new builder for the given operation
    pub fn new(run_mode: RunMode) -> Self {
        Self {
            run_mode,
            ..Default::default()
        }
    }

    /// Adds a seed phenotype, e.g. `hp:0000123`
    pub fn add_phenotype(&mut self, phenotype: &str) {
        self.phenotypes.push(phenotype.to_string());
    }

    /// Sets the `hp.obo` file used to expand the phenotypes
    pub fn set_ontology<P: Into<PathBuf>>(&mut self, ontology: P) {
        self.ontology = Some(ontology.into());
    }

    /// Sets the name of the expansion algorithm, `children` or `distance`
    pub fn set_algorithm(&mut self, algorithm: &str) {
        self.algorithm = Some(algorithm.to_string());
    }

    /// Sets the maximum distance of the `distance` algorithm
    pub fn set_max_distance(&mut self, max_distance: &str) {
        self.max_distance = Some(max_distance.to_string());
    }

    /// Sets the directory of the dataset
    pub fn set_dataset<P: Into<PathBuf>>(&mut self, dataset: P) {
        self.dataset = Some(dataset.into());
    }

    /// Sets the output file, it must not exist yet
    pub fn set_output<P: Into<PathBuf>>(&mut self, output: P) {
        self.output = Some(output.into());
    }

    /// Sets the name of the prioritization strategy
    pub fn set_strategy(&mut self, strategy: &str) {
        self.strategy = Some(strategy.to_string());
    }

    /// Sets the layout of the output file
    pub fn set_output_format(&mut self, output_format: OutputFormat) {
        self.output_format = output_format;
    }

    /// Validates all settings
    ///
    /// # Errors
    ///
    /// [`VibeError::Config`] with one message per missing or invalid setting
    pub fn build(self) -> VibeResult<RunOptions> {
        if self.run_mode == RunMode::None {
            return Ok(RunOptions::default());
        }

        let mut errors: Vec<String> = Vec::new();

        let mut phenotypes = PhenotypeGroup::with_capacity(self.phenotypes.len());
        for phenotype in &self.phenotypes {
            match Phenotype::try_from(phenotype.as_str()) {
                Ok(id) => {
                    phenotypes.insert(id);
                }
                Err(err) => errors.push(format!("invalid phenotype {phenotype}: {err}")),
            }
        }
        if self.phenotypes.is_empty() {
            errors.push("no phenotype was given".to_string());
        }

        match &self.dataset {
            Some(dataset) if !dataset.is_dir() => {
                errors.push(format!("{} is not a directory", dataset.display()));
            }
            Some(_) => (),
            None => errors.push("no dataset directory was given".to_string()),
        }

        match &self.output {
            Some(output) if output.exists() => {
                errors.push(format!("{} already exists", output.display()));
            }
            Some(_) => (),
            None => errors.push("no output file was given".to_string()),
        }

        let max_distance = match self.max_distance.as_deref().map(str::parse::<usize>) {
            Some(Ok(max)) => Some(max),
            Some(Err(_)) => {
                errors.push(format!(
                    "the maximum distance must be a non-negative integer: {}",
                    self.max_distance.as_deref().unwrap_or_default()
                ));
                None
            }
            None => None,
        };

        let algorithm = match self.algorithm.as_deref() {
            // an unparsable maximum distance is reported already
            Some("distance") if self.max_distance.is_some() && max_distance.is_none() => None,
            Some(name) => match OntologyAlgorithm::try_new(name, max_distance) {
                Ok(OntologyAlgorithm::Children) if max_distance.is_some() => {
                    warn!("The children algorithm ignores the maximum distance");
                    Some(OntologyAlgorithm::Children)
                }
                Ok(algorithm) => Some(algorithm),
                Err(err) => {
                    errors.push(message(err));
                    None
                }
            },
            None => None,
        };

        match (&self.ontology, &self.algorithm) {
            (Some(ontology), _) if !ontology.is_file() => {
                errors.push(format!("{} is not a readable file", ontology.display()));
            }
            (Some(_), None) => {
                errors.push("an ontology file requires an ontology algorithm".to_string());
            }
            (None, Some(_)) => {
                errors.push("an ontology algorithm requires an ontology file".to_string());
            }
            _ => (),
        }
        if self.ontology.is_none() && self.max_distance.is_some() {
            errors.push("a maximum distance requires an ontology file".to_string());
        }

        let strategy = match self.strategy.as_deref().map(Strategy::try_from) {
            Some(Ok(strategy)) => strategy,
            Some(Err(err)) => {
                errors.push(message(err));
                Strategy::default()
            }
            None => Strategy::default(),
        };

        if !errors.is_empty() {
            error!("Invalid configuration: {}", errors.join("; "));
            return Err(VibeError::Config(errors));
        }

        Ok(RunOptions {
            run_mode: self.run_mode,
            phenotypes,
            ontology: self.ontology,
            algorithm,
            dataset: self.dataset,
            output: self.output,
            strategy,
            output_format: self.output_format,
        })
    }
}

/// The plain message of a parsing error
fn message(err: VibeError) -> String {
    match err {
        VibeError::InvalidInput(msg) => msg,
        err => err.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn errors(builder: OptionsBuilder) -> Vec<String> {
        match builder.build() {
            Err(VibeError::Config(errors)) => errors,
            other => panic!("expected configuration errors, got {other:?}"),
        }
    }

    fn valid(dir: &Path) -> OptionsBuilder {
        let mut builder = OptionsBuilder::new(RunMode::GenesForPhenotypes);
        builder.add_phenotype("hp:0000123");
        builder.set_dataset(dir);
        builder.set_output(dir.join("out.tsv"));
        builder
    }

    #[test]
    fn run_mode_none_has_no_requirements() {
        let options = OptionsBuilder::new(RunMode::None).build().unwrap();
        assert_eq!(options.run_mode(), RunMode::None);
        assert!(options.phenotypes().is_empty());
    }

    #[test]
    fn minimal() {
        let dir = tempfile::tempdir().unwrap();
        let options = valid(dir.path()).build().unwrap();

        assert_eq!(options.run_mode(), RunMode::GenesForPhenotypes);
        assert!(options.phenotypes().contains(&Phenotype::from(123u32)));
        assert!(options.expansion().is_none());
        assert_eq!(options.dataset(), Some(dir.path()));
        assert_eq!(options.strategy(), Strategy::ScoreMax);
        assert_eq!(options.output_format(), OutputFormat::Detailed);
    }

    #[test]
    fn all_errors_at_once() {
        let mut builder = OptionsBuilder::new(RunMode::GenesForPhenotypes);
        builder.set_strategy("score-min");
        let errors = errors(builder);
        assert_eq!(
            errors,
            [
                "no phenotype was given",
                "no dataset directory was given",
                "no output file was given",
                "unknown prioritization strategy: score-min"
            ]
        );
    }

    #[test]
    fn config_error_lists_every_message() {
        let err = OptionsBuilder::new(RunMode::GenesForPhenotypes)
            .build()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("no phenotype was given\n"));
        assert!(msg.ends_with("no output file was given"));
    }

    #[test]
    fn invalid_phenotypes_are_collected() {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = valid(dir.path());
        builder.add_phenotype("HP:123");
        builder.add_phenotype("Hp:0000124");
        assert_eq!(errors(builder).len(), 2);
    }

    #[test]
    fn existing_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("out.tsv"), "").unwrap();
        let errors = errors(valid(dir.path()));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("already exists"));
    }

    #[test]
    fn dataset_must_be_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = valid(dir.path());
        builder.set_dataset(dir.path().join("missing"));
        assert_eq!(errors(builder).len(), 1);
    }

    #[test]
    fn ontology_and_algorithm() {
        let dir = tempfile::tempdir().unwrap();
        let obo = dir.path().join("hp.obo");
        fs::write(&obo, "format-version: 1.2\n").unwrap();

        let mut builder = valid(dir.path());
        builder.set_ontology(&obo);
        builder.set_algorithm("distance");
        builder.set_max_distance("2");
        let options = builder.build().unwrap();
        assert_eq!(
            options.expansion(),
            Some((obo.as_path(), OntologyAlgorithm::Distance(2)))
        );

        let mut builder = valid(dir.path());
        builder.set_ontology(&obo);
        builder.set_algorithm("children");
        let options = builder.build().unwrap();
        assert_eq!(
            options.expansion(),
            Some((obo.as_path(), OntologyAlgorithm::Children))
        );
    }

    #[test]
    fn ontology_requires_algorithm() {
        let dir = tempfile::tempdir().unwrap();
        let obo = dir.path().join("hp.obo");
        fs::write(&obo, "").unwrap();

        let mut builder = valid(dir.path());
        builder.set_ontology(&obo);
        assert_eq!(
            errors(builder),
            ["an ontology file requires an ontology algorithm"]
        );

        let mut builder = valid(dir.path());
        builder.set_algorithm("children");
        assert_eq!(
            errors(builder),
            ["an ontology algorithm requires an ontology file"]
        );

        let mut builder = valid(dir.path());
        builder.set_max_distance("3");
        assert_eq!(
            errors(builder),
            ["a maximum distance requires an ontology file"]
        );

        let mut builder = valid(dir.path());
        builder.set_algorithm("distance");
        builder.set_max_distance("3");
        assert_eq!(
            errors(builder),
            [
                "an ontology algorithm requires an ontology file",
                "a maximum distance requires an ontology file"
            ]
        );
    }

    #[test]
    fn max_distance_with_children() {
        let dir = tempfile::tempdir().unwrap();
        let obo = dir.path().join("hp.obo");
        fs::write(&obo, "").unwrap();

        let mut builder = valid(dir.path());
        builder.set_ontology(&obo);
        builder.set_algorithm("children");
        builder.set_max_distance("3");
        let options = builder.build().unwrap();
        assert_eq!(
            options.expansion(),
            Some((obo.as_path(), OntologyAlgorithm::Children))
        );
    }

    #[test]
    fn distance_requires_max_distance() {
        let dir = tempfile::tempdir().unwrap();
        let obo = dir.path().join("hp.obo");
        fs::write(&obo, "").unwrap();

        let mut builder = valid(dir.path());
        builder.set_ontology(&obo);
        builder.set_algorithm("distance");
        assert_eq!(
            errors(builder),
            ["the distance algorithm requires a maximum distance"]
        );

        let mut builder = valid(dir.path());
        builder.set_ontology(&obo);
        builder.set_algorithm("distance");
        builder.set_max_distance("-1");
        assert_eq!(
            errors(builder),
            ["the maximum distance must be a non-negative integer: -1"]
        );
    }

    #[test]
    fn unknown_algorithm() {
        let dir = tempfile::tempdir().unwrap();
        let obo = dir.path().join("hp.obo");
        fs::write(&obo, "").unwrap();

        let mut builder = valid(dir.path());
        builder.set_ontology(&obo);
        builder.set_algorithm("parents");
        assert_eq!(errors(builder), ["unknown ontology algorithm: parents"]);
    }

    #[test]
    fn strategies() {
        let dir = tempfile::tempdir().unwrap();
        for (name, strategy) in [
            ("score-max", Strategy::ScoreMax),
            ("dsi-max", Strategy::DsiMax),
            ("dpi-min", Strategy::DpiMin),
        ] {
            let mut builder = valid(dir.path());
            builder.set_strategy(name);
            builder.set_output_format(OutputFormat::Simple);
            let options = builder.build().unwrap();
            assert_eq!(options.strategy(), strategy);
            assert_eq!(options.output_format(), OutputFormat::Simple);
        }
    }
}
