// Logging setup. Log lines go to stderr with the progress bar suspended
// while each line is written, so a run in progress keeps a clean bar.

use indicatif::ProgressBar;
use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init(progress: &ProgressBar) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,dogdisk_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(ProgressAwareStderr {
            bar: progress.clone(),
        }))
        .init();
}

/// Hands out stderr writers tied to the run's progress bar.
pub struct ProgressAwareStderr {
    bar: ProgressBar,
}

impl<'a> MakeWriter<'a> for ProgressAwareStderr {
    type Writer = SuspendingWriter<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendingWriter::new(self.bar.clone(), io::stderr())
    }
}

/// Clears `bar` for the duration of every write to `inner`.
pub struct SuspendingWriter<W> {
    bar: ProgressBar,
    inner: W,
}

impl<W> SuspendingWriter<W> {
    pub fn new(bar: ProgressBar, inner: W) -> Self {
        SuspendingWriter { bar, inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for SuspendingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        self.bar.suspend(|| inner.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        let inner = &mut self.inner;
        self.bar.suspend(|| inner.flush())
    }
}
