// ============================================================
// Layer 4 — Character Vocabulary
// ============================================================
// vocab.txt holds one token per line, in the pretrained
// model's order. The line reader from the `tokenizers`
// WordPiece model does the parsing; ids are then shifted up by
// one so that 0 stays free for padding:
//
//   line 0 "[PAD]" → 1
//   line 1 "[unused1]" → 2
//   ...
//
// Lookups are per `char`, since the segmenter works on single
// characters. Anything missing maps to [UNK].

use anyhow::{anyhow, bail, Result};
use std::{collections::HashMap, path::Path};
use tokenizers::models::wordpiece::WordPiece;

pub const UNK_TOKEN: &str = "[UNK]";

#[derive(Debug, Clone)]
pub struct Vocab {
    ids:    HashMap<String, u32>,
    unk_id: u32,
}

impl Vocab {
    /// Load a vocabulary file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = WordPiece::read_file(&display)
            .map_err(|e| anyhow!("Cannot read vocabulary '{}': {}", display, e))?;

        // Tokens that only differ in surrounding whitespace collide
        // after trimming; the later line wins.
        let mut lines: Vec<(String, u32)> = raw.into_iter().collect();
        lines.sort_unstable_by_key(|&(_, index)| index);

        let mut ids = HashMap::with_capacity(lines.len());
        for (token, index) in lines {
            ids.insert(token.trim().to_string(), index + 1);
        }

        let vocab = Self::from_map(ids)?;
        tracing::info!("Loaded vocabulary of {} tokens from '{}'", vocab.len(), path.display());
        Ok(vocab)
    }

    /// Build from tokens in file order (token i gets id i + 1).
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids = HashMap::new();
        for (index, token) in tokens.into_iter().enumerate() {
            ids.insert(token.into(), index as u32 + 1);
        }
        Self::from_map(ids)
    }

    fn from_map(ids: HashMap<String, u32>) -> Result<Self> {
        let Some(&unk_id) = ids.get(UNK_TOKEN) else {
            bail!("Vocabulary has no {} token", UNK_TOKEN);
        };
        Ok(Self { ids, unk_id })
    }

    /// Drop every id that would not fit an embedding table of
    /// `size` rows. Dropped characters fall back to [UNK].
    pub fn restrict_to(&mut self, size: usize) -> Result<()> {
        if self.unk_id as usize >= size {
            bail!(
                "{} has id {} which is outside an embedding table of {} rows",
                UNK_TOKEN, self.unk_id, size
            );
        }
        let before = self.ids.len();
        self.ids.retain(|_, id| (*id as usize) < size);
        let dropped = before - self.ids.len();
        if dropped > 0 {
            tracing::warn!("{} vocabulary entries exceed the embedding table and map to {}",
                dropped, UNK_TOKEN);
        }
        Ok(())
    }

    pub fn id(&self, c: char) -> u32 {
        let mut buf = [0u8; 4];
        let key: &str = c.encode_utf8(&mut buf);
        self.ids.get(key).copied().unwrap_or(self.unk_id)
    }

    pub fn unk_id(&self) -> u32 {
        self.unk_id
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// One id per char of `sentence`.
    pub fn sentence_to_sequence(&self, sentence: &str) -> Vec<u32> {
        sentence.chars().map(|c| self.id(c)).collect()
    }
}
