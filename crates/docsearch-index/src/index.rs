//! In-memory index construction.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use docsearch_corpus::Corpus;
use levenshtein_automata::LevenshteinAutomatonBuilder;
use log::info;
use tantivy::{
    Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, tokenizer::TextAnalyzer,
};

use crate::{
    IndexError,
    analyzer::{DOC_TOKENIZER, build_analyzer, build_query_analyzer, parse_language},
    options::IndexOptions,
    schema::IndexSchema,
};

/// Heap size for the index writer (Tantivy's per-thread minimum).
const WRITER_HEAP_SIZE: usize = 15_000_000;

/// Search index over one corpus, built once per session.
///
/// Each corpus record becomes one Tantivy document. The index is written by a single
/// thread into RAM and never modified afterwards.
pub struct SearchIndex {
    /// Reader over the committed index.
    pub(crate) reader: IndexReader,
    /// Field handles.
    pub(crate) schema: IndexSchema,
    /// Analyzer used for indexing and match positions.
    pub(crate) analyzer: TextAnalyzer,
    /// Analyzer used for query input.
    pub(crate) query_analyzer: TextAnalyzer,
    /// Analysis and ranking options.
    pub(crate) options: IndexOptions,
    /// Corpus key -> corpus position, for tie-breaking.
    pub(crate) positions: HashMap<String, usize>,
    /// Levenshtein automaton builders keyed by edit distance, built on first use.
    pub(crate) lev_builders: RefCell<HashMap<u8, Rc<LevenshteinAutomatonBuilder>>>,
}

impl SearchIndex {
    /// Builds an index over every record of `corpus`.
    pub fn build(corpus: &Corpus, options: &IndexOptions) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();
        let language = parse_language(&options.stemmer)?;
        let analyzer = build_analyzer(language);

        let index = Index::create_in_ram(schema.schema().clone());
        index.tokenizers().register(DOC_TOKENIZER, analyzer.clone());

        let mut writer: IndexWriter = index
            .writer_with_num_threads(1, WRITER_HEAP_SIZE)
            .map_err(|e| IndexError::create(&e))?;

        for record in corpus.iter() {
            let mut doc = TantivyDocument::new();
            doc.add_text(schema.id, &record.id);
            doc.add_text(schema.title, &record.section_title);
            doc.add_text(schema.content, &record.content);
            doc.add_text(schema.url, &record.url);
            writer
                .add_document(doc)
                .map_err(|e| IndexError::write(&e))?;
        }
        writer.commit().map_err(|e| IndexError::commit(&e))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| IndexError::create(&e))?;

        let positions = corpus
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        info!(
            "indexed {} records (stemmer: {})",
            corpus.len(),
            options.stemmer
        );

        Ok(Self {
            reader,
            schema,
            analyzer,
            query_analyzer: build_query_analyzer(language),
            options: options.clone(),
            positions,
            lev_builders: Default::default(),
        })
    }

    /// Number of indexed documents.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Options the index was built with.
    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Returns the automaton builder for `distance`, building it on first use.
    ///
    /// A `distance` of zero is raised to one.
    pub(crate) fn lev_builder(&self, distance: u8) -> Rc<LevenshteinAutomatonBuilder> {
        let distance = distance.max(1);
        let mut builders = self.lev_builders.borrow_mut();
        let builder = builders
            .entry(distance)
            .or_insert_with(|| Rc::new(LevenshteinAutomatonBuilder::new(distance, true)));
        Rc::clone(builder)
    }
}
