// ============================================================
// Layer 2 - ClassifyUseCase
// ============================================================
// Runs the full pipeline in order:
//
//   Step 1: Load the training CSV          (Layer 4 - data)
//   Step 2: Remove stopwords               (Layer 4 - data)
//   Step 3: Ordered train/validation split (Layer 4 - data)
//   Step 4: Build vocabulary from training (Layer 4 - data)
//   Step 5: Encode + pad sequences         (Layer 4 - data)
//   Step 6: Encode labels over all labels  (Layer 4 - data)
//   Step 7: Build the classifier           (Layer 5 - ml)
//   Step 8: Train, export metrics          (Layer 5/6)
//   Step 9: Predict the test CSV           (Layer 5 - ml)

use anyhow::{Context, Result};
use burn::{module::AutodiffModule, prelude::*};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::NewsDataset,
    encoder::{Padding, SequenceEncoder},
    labels::LabelEncoder,
    loader::CsvLoader,
    splitter::split_texts_and_labels,
    stopwords::StopwordFilter,
    vocabulary::{Vocabulary, OOV_ID},
};
use crate::domain::{
    error::PipelineError,
    record::into_texts_and_labels,
    traits::{RecordSource, TextFilter},
};
use crate::infra::metrics::{MetricsLogger, TrainingHistory};
use crate::ml::{
    model::{NewsClassifier, NewsClassifierConfig},
    predictor::Predictor,
    trainer::run_training,
    InferBackend, TrainBackend,
};

/// Which vocabulary encodes the test texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestVocabulary {
    /// Reuse the vocabulary fitted on the training partition
    #[default]
    Train,
    /// Fit a fresh vocabulary on the test texts
    Refit,
}

// ─── Pipeline Configuration ───────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyConfig {
    pub train_csv:       String,
    pub test_csv:        Option<String>,
    pub metrics_dir:     Option<String>,
    /// Words kept in the vocabulary, besides the OOV token
    pub num_words:       usize,
    pub embedding_dim:   usize,
    pub max_len:         usize,
    pub padding:         Padding,
    pub oov_token:       String,
    pub training_split:  f64,
    pub lstm1_dim:       usize,
    pub lstm2_dim:       usize,
    pub epochs:          usize,
    pub batch_size:      usize,
    pub learning_rate:   f64,
    pub seed:            u64,
    pub test_vocabulary: TestVocabulary,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            train_csv:       "data/bbc-news-train.csv".to_string(),
            test_csv:        None,
            metrics_dir:     None,
            num_words:       1000,
            embedding_dim:   16,
            max_len:         120,
            padding:         Padding::Post,
            oov_token:       "<OOV>".to_string(),
            training_split:  0.8,
            lstm1_dim:       32,
            lstm2_dim:       16,
            epochs:          30,
            batch_size:      32,
            learning_rate:   1e-3,
            seed:            123,
            test_vocabulary: TestVocabulary::Train,
        }
    }
}

impl ClassifyConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        let invalid = |msg: &str| Err(PipelineError::InvalidConfig(msg.to_string()));

        if self.max_len == 0 {
            return invalid("max_len must be at least 1");
        }
        if self.num_words == 0 {
            return invalid("num_words must be at least 1");
        }
        if self.batch_size == 0 {
            return invalid("batch_size must be at least 1");
        }
        if self.embedding_dim == 0 || self.lstm1_dim == 0 || self.lstm2_dim == 0 {
            return invalid("layer sizes must be at least 1");
        }
        if !(self.training_split > 0.0 && self.training_split <= 1.0) {
            return invalid("training_split must be in (0, 1]");
        }
        Ok(())
    }
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct ClassifyReport {
    /// class index → category name
    pub class_names:  Vec<String>,
    pub train_labels: Vec<usize>,
    pub val_labels:   Vec<usize>,
    pub history:      TrainingHistory,
    /// one class index per test row, empty without a test file
    pub predictions:  Vec<usize>,
}

/// Map ids the model has no embedding row for to the OOV id.
fn clamp_to_vocab(sequences: Vec<Vec<u32>>, input_dim: usize) -> Vec<Vec<u32>> {
    let limit = input_dim as u32;
    sequences
        .into_iter()
        .map(|s| s.into_iter().map(|id| if id < limit { id } else { OOV_ID }).collect())
        .collect()
}

pub struct ClassifyUseCase {
    config: ClassifyConfig,
}

impl ClassifyUseCase {
    pub fn new(config: ClassifyConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<ClassifyReport> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load the training CSV ────────────────────────────────────
        let loader  = CsvLoader::labelled(&cfg.train_csv);
        let preview = loader.preview()?;
        tracing::info!("CSV header: {}", preview.header);
        tracing::info!("First data point: {}", preview.first_data.as_deref().unwrap_or("<none>"));

        let records = loader.load_all()?;
        let (raw_texts, labels) = into_texts_and_labels(records)
            .with_context(|| format!("Invalid training file '{}'", cfg.train_csv))?;

        // ── Step 2: Remove stopwords ─────────────────────────────────────────
        let filter    = StopwordFilter::english();
        let sentences = filter.apply_all(&raw_texts);

        tracing::info!("Number of sentences in the training dataset: {}", sentences.len());
        if let Some(first) = sentences.first() {
            tracing::info!(
                "Number of words in the 1st sentence (after removing stopwords): {}",
                first.split_whitespace().count()
            );
        }
        tracing::info!("Number of labels in the dataset: {}", labels.len());
        tracing::info!("First 10 labels: {:?}", &labels[..labels.len().min(10)]);

        // ── Step 3: Ordered train / validation split ─────────────────────────
        let split = split_texts_and_labels(sentences, labels.clone(), cfg.training_split)?;
        tracing::info!(
            "Split: {} train, {} validation",
            split.train_texts.len(),
            split.val_texts.len()
        );
        if split.train_texts.is_empty() {
            return Err(PipelineError::EmptyTrainingSet.into());
        }

        // ── Step 4: Vocabulary from training texts only ──────────────────────
        let vocabulary = Vocabulary::build(&split.train_texts, cfg.num_words, &cfg.oov_token);
        tracing::info!(
            "Number of words in the vocabulary: {} ({} kept, cap {})",
            vocabulary.corpus_words(),
            vocabulary.len() - 1,
            vocabulary.max_words()
        );
        let ranked = vocabulary.words_by_rank();
        tracing::debug!("Top of the vocabulary: {:?}", &ranked[..ranked.len().min(10)]);

        // ── Step 5: Encode + pad ─────────────────────────────────────────────
        let encoder    = SequenceEncoder::new(&vocabulary, cfg.max_len, cfg.padding)?;
        let train_seqs = encoder.encode_all(&split.train_texts)?;
        let val_seqs   = encoder.encode_all(&split.val_texts)?;
        tracing::info!("Shape of padded training sequences: ({}, {})", train_seqs.len(), cfg.max_len);
        tracing::info!("Shape of padded validation sequences: ({}, {})", val_seqs.len(), cfg.max_len);

        // ── Step 6: Labels, fitted on ALL labels ─────────────────────────────
        let label_encoder = LabelEncoder::fit(&labels);
        let train_labels  = label_encoder.encode(&split.train_labels)?;
        let val_labels    = label_encoder.encode(&split.val_labels)?;
        tracing::info!("First 5 labels of the training set: {:?}", &train_labels[..train_labels.len().min(5)]);
        tracing::info!("First 5 labels of the validation set: {:?}", &val_labels[..val_labels.len().min(5)]);
        tracing::info!(
            "Number of unique categories in the training dataset: {}",
            label_encoder.num_classes()
        );

        let train_dataset = NewsDataset::from_encoded(train_seqs, train_labels.clone())?;
        let val_dataset   = NewsDataset::from_encoded(val_seqs, val_labels.clone())?;

        // ── Step 7: Build the classifier ─────────────────────────────────────
        TrainBackend::seed(cfg.seed);
        let device: <TrainBackend as Backend>::Device = Default::default();

        let model_cfg = NewsClassifierConfig::new(vocabulary.input_dim(), label_encoder.num_classes())
            .with_embedding_dim(cfg.embedding_dim)
            .with_lstm1_dim(cfg.lstm1_dim)
            .with_lstm2_dim(cfg.lstm2_dim);
        let model: NewsClassifier<TrainBackend> = model_cfg.init(&device);
        tracing::info!(
            "Model: embedding({}x{}) → BiLSTM({}) → BiLSTM({}) → dense({}), {} parameters",
            model_cfg.vocab_size,
            model_cfg.embedding_dim,
            model_cfg.lstm1_dim,
            model_cfg.lstm2_dim,
            model_cfg.num_classes,
            model.num_params()
        );

        // ── Step 8: Train ────────────────────────────────────────────────────
        let (model, history) = run_training(cfg, model, train_dataset, val_dataset, &device)?;

        if let Some(dir) = &cfg.metrics_dir {
            MetricsLogger::new(dir.clone())?.write(&history)?;
        }

        // ── Step 9: Predict the test CSV ─────────────────────────────────────
        let predictions = match &cfg.test_csv {
            Some(path) => self.predict_file(path, &vocabulary, model.valid(), device)?,
            None => Vec::new(),
        };

        Ok(ClassifyReport {
            class_names: label_encoder.classes().to_vec(),
            train_labels,
            val_labels,
            history,
            predictions,
        })
    }

    fn predict_file(
        &self,
        path:       &str,
        vocabulary: &Vocabulary,
        model:      NewsClassifier<InferBackend>,
        device:     <InferBackend as Backend>::Device,
    ) -> Result<Vec<usize>> {
        let cfg = &self.config;

        let records = CsvLoader::unlabelled(path).load_all()?;
        let texts: Vec<String> = records.into_iter().map(|r| r.text).collect();
        let sentences = StopwordFilter::english().apply_all(&texts);

        tracing::info!("Number of sentences in the test dataset: {}", sentences.len());
        if let Some(first) = sentences.first() {
            tracing::info!(
                "Number of words in the 1st test sentence (after removing stopwords): {}",
                first.split_whitespace().count()
            );
        }

        let refitted;
        let test_vocabulary = match cfg.test_vocabulary {
            TestVocabulary::Train => vocabulary,
            TestVocabulary::Refit => {
                tracing::warn!(
                    "Refitting the vocabulary on test texts: ranks will not match the ones the model was trained on"
                );
                refitted = Vocabulary::build(&sentences, cfg.num_words, &cfg.oov_token);
                &refitted
            }
        };
        tracing::info!("Number of words in the test vocabulary: {}", test_vocabulary.corpus_words());

        let encoder   = SequenceEncoder::new(test_vocabulary, cfg.max_len, cfg.padding)?;
        let test_seqs = clamp_to_vocab(encoder.encode_all(&sentences)?, vocabulary.input_dim());
        tracing::info!("Shape of padded test sequences: ({}, {})", test_seqs.len(), cfg.max_len);

        let predictions = Predictor::new(model, device).predict(&test_seqs)?;
        tracing::info!("Predicted {} test rows", predictions.len());
        Ok(predictions)
    }
}
