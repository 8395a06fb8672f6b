/*!
 * Simulator Session
 *
 * Presentation-side collaborator of the region allocator: validates user input
 * before calling into the region, keeps the operation log, offers compaction
 * when small fragments show up, and renders the region after each command.
 */

pub mod command;
pub mod operation_log;
pub mod view;

pub use command::{Command, CommandError, HELP_TEXT};
pub use operation_log::{LogEntry, LogLevel, OperationLog};
pub use view::{BarSegment, BlockRow};

use crate::core::limits::BAR_WIDTH;
use crate::core::types::{BlockIndex, Size};
use crate::core::SimulatorConfig;
use crate::memory::{
    FitStrategy, FragmentSurvey, MemoryError, MemoryStats, RegionAllocator, RegionManager,
};
use crate::monitoring::CommandSpan;
use miette::Diagnostic;
use serde::Serialize;
use std::io::BufRead;
use thiserror::Error;
use tracing::{info, warn};

pub type SessionResult<T> = Result<T, SessionError>;

/// Session errors
///
/// Messages are phrased for the end user; they are also what lands in the log.
#[derive(Error, Debug, Diagnostic)]
pub enum SessionError {
    #[error("Please initialize memory first.")]
    #[diagnostic(code(session::not_initialized), help("Run `init <size>`."))]
    NotInitialized,

    #[error("{0}")]
    #[diagnostic(code(session::invalid_input))]
    InvalidInput(String),

    #[error("Size exceeds available free memory ({available} bytes).")]
    #[diagnostic(code(session::insufficient_memory))]
    InsufficientMemory { requested: Size, available: Size },

    #[error("Memory compaction failed or was not needed.")]
    #[diagnostic(code(session::compaction_not_needed))]
    CompactionNotNeeded(#[source] MemoryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Command(#[from] CommandError),

    #[error("Failed to serialize snapshot: {0}")]
    #[diagnostic(code(session::serialization))]
    Serialization(#[from] serde_json::Error),
}

/// Region state as the presentation layer sees it
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub total_size: Size,
    pub next_fit_cursor: BlockIndex,
    pub compaction_threshold: Size,
    pub pending_compaction: Option<FragmentSurvey>,
    pub stats: MemoryStats,
    pub blocks: Vec<BlockRow>,
    pub bar: Vec<BarSegment>,
    pub next_fit_marker_percent: Option<f64>,
}

/// Interactive session over a region manager
pub struct Session<M: RegionManager = RegionAllocator> {
    region: M,
    log: OperationLog,
    compaction_threshold: Size,
    pending_compaction: Option<FragmentSurvey>,
}

impl<M: RegionManager + Default> Session<M> {
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_region(M::default(), config)
    }
}

impl<M: RegionManager> Session<M> {
    pub fn with_region(region: M, config: SimulatorConfig) -> Self {
        let mut session = Self {
            region,
            log: OperationLog::new(),
            compaction_threshold: config.compaction_threshold,
            pending_compaction: None,
        };
        if config.auto_init {
            session.initialize(config.total_size);
        }
        session
    }

    pub fn region(&self) -> &M {
        &self.region
    }

    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    pub fn compaction_threshold(&self) -> Size {
        self.compaction_threshold
    }

    /// Survey recorded by the last fragmentation check, until compaction or re-init
    pub fn pending_compaction(&self) -> Option<FragmentSurvey> {
        self.pending_compaction
    }

    /// Parse and execute one line, logging failures
    ///
    /// Returns the text to show the user, or `None` for blank lines.
    pub fn run_line(&mut self, line: &str) -> Option<String> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return None,
            Err(e) => {
                let err = SessionError::from(e);
                self.log.error(err.to_string());
                return Some(format!("error: {}", err));
            }
        };

        let span = CommandSpan::new(command.name());
        let _entered = span.enter();

        match self.execute(command) {
            Ok(output) => {
                span.record_result(true);
                Some(output)
            }
            Err(err) => {
                span.record_error(&err.to_string());
                warn!(trace_id = span.trace_id(), error = %err, "command rejected");
                self.log.error(err.to_string());
                Some(format!("error: {}", err))
            }
        }
    }

    /// Run every line of `reader`, returning the non-empty outputs in order
    pub fn run_script<R: BufRead>(&mut self, reader: R) -> std::io::Result<Vec<String>> {
        let mut outputs = Vec::new();
        for line in reader.lines() {
            if let Some(output) = self.run_line(&line?) {
                outputs.push(output);
            }
        }
        Ok(outputs)
    }

    /// Execute a parsed command
    pub fn execute(&mut self, command: Command) -> SessionResult<String> {
        match command {
            Command::Init { total_size } => {
                if total_size == 0 {
                    return Err(SessionError::InvalidInput(
                        "Total memory size must be a positive number.".into(),
                    ));
                }
                Ok(self.initialize(total_size))
            }
            Command::Alloc {
                owner,
                size,
                strategy,
            } => self.allocate(&owner, size, strategy),
            Command::Free { owner } => self.deallocate(&owner),
            Command::Check => self.check_fragmentation(),
            Command::Compact => self.compact(),
            Command::Threshold { size } => {
                if size == 0 {
                    return Err(SessionError::InvalidInput(
                        "Fragment size threshold must be a positive number.".into(),
                    ));
                }
                self.compaction_threshold = size;
                let message = format!("Compaction threshold set to {} bytes.", size);
                self.log.info(message.clone());
                Ok(message)
            }
            Command::Stats => Ok(view::render_stats(&self.region.stats())),
            Command::Show => Ok(self.render()),
            Command::Log => Ok(self.log.render()),
            Command::Json => Ok(serde_json::to_string_pretty(&self.snapshot())?),
            Command::Help => Ok(HELP_TEXT.to_string()),
        }
    }

    fn initialize(&mut self, total_size: Size) -> String {
        self.region.initialize(total_size);
        self.pending_compaction = None;
        let message = format!("Memory initialized with size {} bytes.", total_size);
        info!(total_size, "region initialized");
        self.log.info(message.clone());
        message
    }

    fn allocate(&mut self, owner: &str, size: Size, strategy: FitStrategy) -> SessionResult<String> {
        self.ensure_initialized()?;

        if size == 0 {
            return Err(SessionError::InvalidInput("Size must be greater than 0.".into()));
        }
        let available = self.region.stats().free;
        if size > available {
            return Err(SessionError::InsufficientMemory {
                requested: size,
                available,
            });
        }
        if owner.trim().is_empty() {
            return Err(SessionError::InvalidInput("Process ID cannot be empty.".into()));
        }
        if self.region.active_owners().contains(&owner) {
            return Err(SessionError::InvalidInput(format!(
                "Process ID \"{}\" already exists.",
                owner
            )));
        }

        let address = self.region.allocate(owner, size, strategy)?;
        let message = format!("Allocated {} bytes to {} using {} Fit.", size, owner, strategy);
        info!(owner, size, address, strategy = %strategy, "allocation placed");
        self.log.success(message.clone());

        Ok(self.with_fragmentation_offer(message))
    }

    fn deallocate(&mut self, owner: &str) -> SessionResult<String> {
        self.ensure_initialized()?;

        if owner.trim().is_empty() {
            return Err(SessionError::InvalidInput(
                "Please select a process to free.".into(),
            ));
        }

        let size = self.region.deallocate(owner)?;
        let message = format!("Deallocated process {}.", owner);
        info!(owner, size, "allocation released");
        self.log.info(message.clone());

        Ok(self.with_fragmentation_offer(message))
    }

    fn check_fragmentation(&mut self) -> SessionResult<String> {
        self.ensure_initialized()?;

        match self.survey() {
            Some(survey) => Ok(offer_text(&survey)),
            None => Ok(format!(
                "No memory fragments smaller than {} bytes found.",
                self.compaction_threshold
            )),
        }
    }

    fn compact(&mut self) -> SessionResult<String> {
        self.ensure_initialized()?;

        let report = self
            .region
            .compact(self.compaction_threshold)
            .map_err(SessionError::CompactionNotNeeded)?;
        self.pending_compaction = None;

        let message = format!(
            "Memory compaction completed. Consolidated {} fragments ({} bytes).",
            report.survey.fragment_count, report.survey.total_size
        );
        info!(
            fragments = report.survey.fragment_count,
            relocated = report.relocated_blocks,
            free_size = report.free_size,
            "region compacted"
        );
        self.log.success(message.clone());
        Ok(message)
    }

    /// Record and return the current small-fragment survey, if any fragment exists
    fn survey(&mut self) -> Option<FragmentSurvey> {
        let survey = self.region.small_fragment_survey(self.compaction_threshold);
        self.pending_compaction = (!survey.is_empty()).then_some(survey);
        self.pending_compaction
    }

    fn with_fragmentation_offer(&mut self, message: String) -> String {
        match self.survey() {
            Some(survey) => format!("{}\n{}", message, offer_text(&survey)),
            None => message,
        }
    }

    fn ensure_initialized(&self) -> SessionResult<()> {
        if self.region.is_initialized() {
            Ok(())
        } else {
            Err(SessionError::NotInitialized)
        }
    }

    /// Bar, next-fit marker, statistics and block table
    pub fn render(&self) -> String {
        if !self.region.is_initialized() {
            return "Memory not initialized.".to_string();
        }
        format!(
            "{}\n{}\n{}",
            view::render_bar(&self.region, BAR_WIDTH),
            view::render_stats(&self.region.stats()),
            view::render_table(&self.region)
        )
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            total_size: self.region.total_size(),
            next_fit_cursor: self.region.next_fit_cursor(),
            compaction_threshold: self.compaction_threshold,
            pending_compaction: self.pending_compaction,
            stats: self.region.stats(),
            blocks: view::block_rows(&self.region),
            bar: view::bar_segments(&self.region),
            next_fit_marker_percent: view::cursor_marker_percent(&self.region),
        }
    }
}

fn offer_text(survey: &FragmentSurvey) -> String {
    format!(
        "Found {} small memory fragments (less than {} bytes) totaling {} bytes. Run `compact` to defragment.",
        survey.fragment_count, survey.threshold, survey.total_size
    )
}
