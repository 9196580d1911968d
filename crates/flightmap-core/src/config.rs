/// Tuning knobs for one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Buffer size of the record and error channels. A capacity of one keeps
    /// every decode task waiting until its result has been handed over.
    pub channel_capacity: usize,
    /// Upper bound on decode tasks in flight. `None` spawns one task per
    /// record without limit.
    pub max_concurrent_decodes: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1,
            max_concurrent_decodes: None,
        }
    }
}

impl PipelineConfig {
    pub(crate) fn capacity(&self) -> usize {
        self.channel_capacity.max(1)
    }

    pub(crate) fn decode_limit(&self) -> Option<usize> {
        self.max_concurrent_decodes.map(|limit| limit.max(1))
    }
}
