/// Per-item outcome recorded by the batch driver. Replaces process-wide
/// success/failure counters: every phase returns its outcomes and the caller
/// folds them into one report.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemStatus {
    Ok,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ItemOutcome {
    pub name: String,
    pub status: ItemStatus,
    pub detail: String,
}

#[derive(Debug, Default)]
pub struct RunReport {
    entries: Vec<ItemOutcome>,
    api_calls: u32,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_ok(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.entries.push(ItemOutcome {
            name: name.into(),
            status: ItemStatus::Ok,
            detail: detail.into(),
        });
    }

    pub fn record_fail(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.entries.push(ItemOutcome {
            name: name.into(),
            status: ItemStatus::Failed,
            detail: detail.into(),
        });
    }

    pub fn count_api_calls(&mut self, attempts: u32) {
        self.api_calls += attempts;
    }

    pub fn merge(&mut self, other: RunReport) {
        self.entries.extend(other.entries);
        self.api_calls += other.api_calls;
    }

    pub fn api_calls(&self) -> u32 {
        self.api_calls
    }

    pub fn successes(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.entries
            .iter()
            .filter(|e| e.status == ItemStatus::Ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.entries
            .iter()
            .filter(|e| e.status == ItemStatus::Failed)
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }

    /// End-of-run summary, successes and failures listed by name.
    pub fn log_summary(&self) {
        log::info!("{}", "=".repeat(60));
        log::info!("RUN SUMMARY");
        log::info!("{}", "=".repeat(60));
        log::info!("API calls made: {}", self.api_calls);
        log::info!("Successful:     {}", self.success_count());
        log::info!("Failed:         {}", self.failure_count());

        if self.success_count() > 0 {
            log::info!("--- Successes ({}) ---", self.success_count());
            for item in self.successes() {
                log::info!("  ✅ {}: {}", item.name, item.detail);
            }
        }

        if self.failure_count() > 0 {
            log::warn!("--- Failures ({}) ---", self.failure_count());
            for item in self.failures() {
                log::warn!("  ❌ {}: {}", item.name, item.detail);
            }
        }
    }
}
