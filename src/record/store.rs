use crate::record::ArticleRecord;

/// Append-only collection of the records gathered during one run
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<ArticleRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record
    ///
    /// Records without a title or url are refused so that every stored
    /// record carries both keys.
    pub fn push(&mut self, record: ArticleRecord) -> bool {
        if !record.is_complete() {
            tracing::warn!(
                "Refusing incomplete record (title: {:?}, url: {:?})",
                record.title,
                record.url
            );
            return false;
        }
        self.records.push(record);
        true
    }

    /// Appends every record from an iterator, returning how many were kept
    pub fn extend<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = ArticleRecord>,
    {
        records
            .into_iter()
            .map(|record| self.push(record))
            .filter(|kept| *kept)
            .count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArticleRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&ArticleRecord> {
        self.records.last()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a ArticleRecord;
    type IntoIter = std::slice::Iter<'a, ArticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
