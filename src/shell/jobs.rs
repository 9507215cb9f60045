// Copyright 2018-2025 the Deno authors. MIT license.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use futures::FutureExt;
use tokio::task::JoinHandle;

struct Job {
  id: usize,
  pid: u32,
  command: String,
  /// Resolves to the exit code once the process was reaped.
  handle: JoinHandle<i32>,
}

/// A background job that is still running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningJob {
  pub id: usize,
  pub pid: u32,
  pub command: String,
}

impl RunningJob {
  /// Formats the job for `jobs`, optionally including its pid.
  pub fn display(&self, with_pid: bool) -> String {
    if with_pid {
      format!("[{}] {} Running\t{}", self.id, self.pid, self.command)
    } else {
      format!("[{}] Running\t{}", self.id, self.command)
    }
  }
}

/// A background job whose process has exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedJob {
  pub id: usize,
  pub command: String,
  pub exit_code: i32,
}

impl fmt::Display for FinishedJob {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.exit_code == 0 {
      write!(f, "[{}] Done\t{}", self.id, self.command)
    } else {
      write!(f, "[{}] Exit {}\t{}", self.id, self.exit_code, self.command)
    }
  }
}

/// Background processes started by the interpreter.
///
/// Each job is awaited by its own local task so the process is reaped as
/// soon as it exits. Jobs stay listed until they are reported, either by
/// `reap_finished` or `wait_all`. Clones share the same list.
#[derive(Clone, Default)]
pub struct JobList(Rc<RefCell<Vec<Job>>>);

impl JobList {
  /// Registers a spawned process and returns its job id.
  ///
  /// Ids start at 1 and are one more than the highest id still listed.
  pub fn push(&self, pid: u32, command: String, handle: JoinHandle<i32>) -> usize {
    let mut jobs = self.0.borrow_mut();
    let id = jobs.last().map(|job| job.id + 1).unwrap_or(1);
    jobs.push(Job {
      id,
      pid,
      command,
      handle,
    });
    id
  }

  pub fn len(&self) -> usize {
    self.0.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.borrow().is_empty()
  }

  /// Jobs whose process hasn't been reported as finished, ordered by id.
  pub fn running(&self) -> Vec<RunningJob> {
    self
      .0
      .borrow()
      .iter()
      .filter(|job| !job.handle.is_finished())
      .map(|job| RunningJob {
        id: job.id,
        pid: job.pid,
        command: job.command.clone(),
      })
      .collect()
  }

  /// Removes and returns the jobs that finished, without waiting.
  pub fn reap_finished(&self) -> Vec<FinishedJob> {
    let mut jobs = self.0.borrow_mut();
    let mut finished = Vec::new();
    let mut index = 0;
    while index < jobs.len() {
      if jobs[index].handle.is_finished() {
        let mut job = jobs.remove(index);
        let exit_code = match (&mut job.handle).now_or_never() {
          Some(result) => exit_code_from_join(result),
          // is_finished guarantees the output is ready
          None => 1,
        };
        finished.push(job.into_finished(exit_code));
      } else {
        index += 1;
      }
    }
    for job in &finished {
      tracing::debug!(id = job.id, exit_code = job.exit_code, "reaped job");
    }
    finished
  }

  /// Waits for every listed job, returning them in id order.
  pub async fn wait_all(&self) -> Vec<FinishedJob> {
    // take the jobs out so the list isn't borrowed across an await
    let jobs = std::mem::take(&mut *self.0.borrow_mut());
    let mut finished = Vec::with_capacity(jobs.len());
    for mut job in jobs {
      let exit_code = exit_code_from_join((&mut job.handle).await);
      tracing::debug!(id = job.id, exit_code, "waited for job");
      finished.push(job.into_finished(exit_code));
    }
    finished
  }
}

impl Job {
  fn into_finished(self, exit_code: i32) -> FinishedJob {
    FinishedJob {
      id: self.id,
      command: self.command,
      exit_code,
    }
  }
}

fn exit_code_from_join(result: Result<i32, tokio::task::JoinError>) -> i32 {
  match result {
    Ok(exit_code) => exit_code,
    Err(err) => {
      tracing::warn!("background job task failed: {err}");
      1
    }
  }
}
