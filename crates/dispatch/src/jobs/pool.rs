use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::config::JobsSection;

type Job<'a> = Box<dyn FnOnce() + Send + 'a>;

/// Tasks produced while draining queued actions.
///
/// Tasks are grouped in stages. Tasks of one stage run concurrently; a stage
/// starts only once every task of the previous stage has finished.
pub struct JobBatch<'a> {
	stages: Vec<Vec<Job<'a>>>,
}

impl<'a> JobBatch<'a> {
	/// Creates a batch with one empty stage.
	pub fn new() -> Self {
		Self { stages: vec![Vec::new()] }
	}

	/// Adds a task to the current stage.
	pub fn schedule<F>(&mut self, task: F)
	where
		F: FnOnce() + Send + 'a,
	{
		if let Some(stage) = self.stages.last_mut() {
			stage.push(Box::new(task));
		} else {
			self.stages.push(vec![Box::new(task)]);
		}
	}

	/// Closes the current stage; later tasks depend on everything scheduled so far.
	pub fn then(&mut self) {
		if self.stages.last().is_some_and(|stage| !stage.is_empty()) {
			self.stages.push(Vec::new());
		}
	}

	/// Total number of tasks.
	pub fn len(&self) -> usize {
		self.stages.iter().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Number of non-empty stages.
	pub fn stage_count(&self) -> usize {
		self.stages.iter().filter(|stage| !stage.is_empty()).count()
	}
}

impl Default for JobBatch<'_> {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for JobBatch<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("JobBatch")
			.field("stages", &self.stage_count())
			.field("tasks", &self.len())
			.finish()
	}
}

/// Worker pool that runs [`JobBatch`]es.
pub struct JobPool {
	pool: ThreadPool,
}

impl JobPool {
	/// Builds a pool with `threads` workers; `0` lets rayon pick.
	pub fn new(threads: usize) -> Result<Self, ThreadPoolBuildError> {
		let pool = ThreadPoolBuilder::new()
			.num_threads(threads)
			.thread_name(|i| format!("izumi-job-{i}"))
			.build()?;
		Ok(Self { pool })
	}

	/// Builds a pool from the `[jobs]` config table.
	pub fn from_config(config: &JobsSection) -> Result<Self, ThreadPoolBuildError> {
		Self::new(config.threads)
	}

	/// Number of worker threads.
	pub fn threads(&self) -> usize {
		self.pool.current_num_threads()
	}

	/// Runs every task of `batch` to completion, stage by stage.
	///
	/// Returns the number of tasks run. A panicking task propagates its panic
	/// once the rest of its stage has finished.
	pub fn run(&self, batch: JobBatch<'_>) -> usize {
		let mut ran = 0;
		for stage in batch.stages {
			if stage.is_empty() {
				continue;
			}
			ran += stage.len();
			self.pool.scope(|scope| {
				for job in stage {
					scope.spawn(move |_| job());
				}
			});
		}
		ran
	}
}

impl std::fmt::Debug for JobPool {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("JobPool").field("threads", &self.threads()).finish()
	}
}
