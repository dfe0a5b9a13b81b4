// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Two subcommands: `run` (the full pipeline) and `inspect`
// (header + first data point of a CSV file).
//
// Every hyper-parameter flag defaults to the value the pipeline
// was designed around, so `run --train-csv X --test-csv Y`
// reproduces the reference setup.

use clap::{Args, Subcommand, ValueEnum};

use crate::application::classify_use_case::{ClassifyConfig, TestVocabulary};
use crate::data::encoder::Padding;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the classifier on a labelled CSV and predict a test CSV
    Run(RunArgs),

    /// Print the header and first data point of a CSV file
    Inspect(InspectArgs),
}

/// Padding side, as accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PaddingArg {
    Pre,
    Post,
}

impl From<PaddingArg> for Padding {
    fn from(p: PaddingArg) -> Self {
        match p {
            PaddingArg::Pre  => Padding::Pre,
            PaddingArg::Post => Padding::Post,
        }
    }
}

/// Vocabulary used for the test file, as accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum TestVocabArg {
    /// Reuse the training vocabulary
    Train,
    /// Fit a new vocabulary on the test texts
    Refit,
}

impl From<TestVocabArg> for TestVocabulary {
    fn from(v: TestVocabArg) -> Self {
        match v {
            TestVocabArg::Train => TestVocabulary::Train,
            TestVocabArg::Refit => TestVocabulary::Refit,
        }
    }
}

/// All arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Training CSV with columns (id, text, category)
    #[arg(long, default_value = "data/bbc-news-train.csv")]
    pub train_csv: String,

    /// Test CSV with columns (id, text); skip prediction when absent
    #[arg(long)]
    pub test_csv: Option<String>,

    /// Write per-epoch metrics.csv into this directory
    #[arg(long)]
    pub metrics_dir: Option<String>,

    /// Most frequent training words kept in the vocabulary
    #[arg(long, default_value_t = 1000)]
    pub num_words: usize,

    /// Width of the word embedding
    #[arg(long, default_value_t = 16)]
    pub embedding_dim: usize,

    /// Every sequence is truncated/padded to this many tokens
    #[arg(long, default_value_t = 120)]
    pub max_len: usize,

    #[arg(long, value_enum, default_value_t = PaddingArg::Post)]
    pub padding: PaddingArg,

    /// Token that replaces out-of-vocabulary words
    #[arg(long, default_value = "<OOV>")]
    pub oov_token: String,

    /// Fraction of the labelled rows used for training
    #[arg(long, default_value_t = 0.8)]
    pub training_split: f64,

    /// Hidden size of the first bidirectional LSTM
    #[arg(long, default_value_t = 32)]
    pub lstm1_dim: usize,

    /// Hidden size of the second bidirectional LSTM
    #[arg(long, default_value_t = 16)]
    pub lstm2_dim: usize,

    #[arg(long, default_value_t = 30)]
    pub epochs: usize,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Seed for weight initialisation and batch shuffling
    #[arg(long, default_value_t = 123)]
    pub seed: u64,

    #[arg(long, value_enum, default_value_t = TestVocabArg::Train)]
    pub test_vocab: TestVocabArg,
}

/// Convert CLI RunArgs into the application-layer ClassifyConfig.
/// The application layer never sees clap types.
impl From<RunArgs> for ClassifyConfig {
    fn from(a: RunArgs) -> Self {
        ClassifyConfig {
            train_csv:       a.train_csv,
            test_csv:        a.test_csv,
            metrics_dir:     a.metrics_dir,
            num_words:       a.num_words,
            embedding_dim:   a.embedding_dim,
            max_len:         a.max_len,
            padding:         a.padding.into(),
            oov_token:       a.oov_token,
            training_split:  a.training_split,
            lstm1_dim:       a.lstm1_dim,
            lstm2_dim:       a.lstm2_dim,
            epochs:          a.epochs,
            batch_size:      a.batch_size,
            learning_rate:   a.lr,
            seed:            a.seed,
            test_vocabulary: a.test_vocab.into(),
        }
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// CSV file to look at
    #[arg(long)]
    pub file: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_run_defaults_match_config_defaults() {
        let cli = Cli::try_parse_from(["news-classifier", "run"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        let cfg      = ClassifyConfig::from(args);
        let defaults = ClassifyConfig::default();

        assert_eq!(cfg.num_words, defaults.num_words);
        assert_eq!(cfg.max_len, defaults.max_len);
        assert_eq!(cfg.padding, defaults.padding);
        assert_eq!(cfg.oov_token, defaults.oov_token);
        assert_eq!(cfg.epochs, defaults.epochs);
        assert_eq!(cfg.test_vocabulary, defaults.test_vocabulary);
        assert_eq!(cfg.test_csv, None);
    }

    #[test]
    fn test_run_flags_are_applied() {
        let cli = Cli::try_parse_from([
            "news-classifier", "run",
            "--train-csv", "train.csv",
            "--test-csv", "test.csv",
            "--padding", "pre",
            "--test-vocab", "refit",
            "--epochs", "3",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        let cfg = ClassifyConfig::from(args);

        assert_eq!(cfg.train_csv, "train.csv");
        assert_eq!(cfg.test_csv.as_deref(), Some("test.csv"));
        assert_eq!(cfg.padding, Padding::Pre);
        assert_eq!(cfg.test_vocabulary, TestVocabulary::Refit);
        assert_eq!(cfg.epochs, 3);
    }

    #[test]
    fn test_inspect_requires_file() {
        assert!(Cli::try_parse_from(["news-classifier", "inspect"]).is_err());
    }
}
