//! Batch Rendering
//!
//! Renders many diagram files on a pool of worker threads. Jobs are
//! handed out over a channel; each worker loads its own font and
//! renderer, since FreeType handles cannot move between threads.
//! A failing file is reported and never stops the batch.

use crate::compose::{RenderOptions, Renderer};
use crate::decode;
use crate::error::BatchError;
use crate::png::write_png;

use crossbeam::channel;

use std::path::{Path, PathBuf};

/// Single input file and where its image goes
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Job {
    /// Job writing `<stem>.png` into `out_dir`, or next to the input
    pub fn new<P: AsRef<Path>>(input: P, out_dir: Option<&Path>) -> Self {
        let input = input.as_ref().to_path_buf();
        let output = match out_dir {
            Some(dir) => {
                let mut name = input.file_stem()
                    .unwrap_or_else(|| input.as_os_str())
                    .to_os_string();
                name.push(".png");
                dir.join(name)
            },
            None => input.with_extension("png"),
        };
        Self { input, output }
    }
}

/// Outcome of a single Job
#[derive(Debug)]
pub struct Report {
    pub job: Job,
    pub result: Result<(), BatchError>,
}

/// Find all `*.xml` files below `path`, sorted
///
/// A file is returned as is, whatever its extension
pub fn collect_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>, BatchError> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut found = vec![];
    let mut dirs = vec![path.to_path_buf()];
    while let Some(dir) = dirs.pop() {
        let io = |source: std::io::Error| BatchError::Io { path: dir.clone(), source };
        for entry in std::fs::read_dir(&dir).map_err(io)? {
            let p = entry.map_err(io)?.path();
            if p.is_dir() {
                dirs.push(p);
            } else if p.extension().map_or(false, |e| e.eq_ignore_ascii_case("xml")) {
                found.push(p);
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Render one Job with an existing Renderer
pub fn render_job(renderer: &Renderer, job: &Job) -> Result<(), BatchError> {
    let diagram = decode::load(&job.input)
        .map_err(|source| BatchError::Decode { path: job.input.clone(), source })?;
    let pix = renderer.render(&diagram)?;
    write_png(&job.output, &pix)
        .map_err(|source| BatchError::Encode { path: job.output.clone(), source })?;
    Ok(())
}

/// Render all Jobs on `workers` threads
///
/// Reports are returned in the order of `jobs`
pub fn render_all(jobs: Vec<Job>, opts: &RenderOptions, workers: usize) -> Vec<Report> {
    let workers = workers.max(1).min(jobs.len().max(1));
    let (job_tx, job_rx) = channel::unbounded();
    let (res_tx, res_rx) = channel::unbounded();
    let n = jobs.len();
    for job in jobs.into_iter().enumerate() {
        let _ = job_tx.send(job);
    }
    drop(job_tx);
    log::info!("rendering {} files on {} workers", n, workers);

    let scope = crossbeam::scope(|s| {
        for id in 0 .. workers {
            let job_rx = job_rx.clone();
            let res_tx = res_tx.clone();
            s.spawn(move |_| {
                let mut renderer = None;
                for (i, job) in job_rx.iter() {
                    log::debug!("worker {}: {}", id, job.input.display());
                    let result = match renderer {
                        Some(ref r) => render_job(r, &job),
                        None => match Renderer::new(opts.clone()) {
                            Ok(r) => render_job(renderer.get_or_insert(r), &job),
                            Err(err) => Err(err.into()),
                        },
                    };
                    let _ = res_tx.send((i, Report { job, result }));
                }
            });
        }
    });
    if let Err(panic) = scope {
        std::panic::resume_unwind(panic);
    }
    drop(res_tx);

    let mut reports : Vec<_> = res_rx.iter().collect();
    reports.sort_by_key(|(i, _)| *i);
    let reports : Vec<Report> = reports.into_iter().map(|(_, r)| r).collect();
    for r in &reports {
        match &r.result {
            Ok(()) => log::info!("{} -> {}", r.job.input.display(), r.job.output.display()),
            Err(err) => log::warn!("{}: {}", r.job.input.display(), error_chain(err)),
        }
    }
    reports
}

/// Error message followed by its sources
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        msg.push_str(": ");
        msg.push_str(&e.to_string());
        source = e.source();
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names() {
        let job = Job::new("a/b/flow.xml", None);
        assert_eq!(job.output, PathBuf::from("a/b/flow.png"));
        let job = Job::new("a/b/flow.xml", Some(Path::new("out")));
        assert_eq!(job.output, PathBuf::from("out/flow.png"));
    }
}
