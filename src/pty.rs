use crate::display::Display;
use crate::session::Session;
use anyhow::{Context, Result};
use portable_pty::{native_pty_system, Child, CommandBuilder, PtySize};
use std::io::Read;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

const READ_CHUNK: usize = 4096;

/// Runs the hosted program as a child process on a pseudo-terminal.
///
/// A child cannot be fed input after the fact: one that is still alive but has written nothing
/// for the quiet period is assumed to be waiting on stdin. It is killed and the session is put
/// into continuation mode, so the next line re-runs it with the extra arguments.
pub struct PtyInvoker {
    quiet_period: Duration,
    size: PtySize,
}

impl PtyInvoker {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            size: PtySize::default(),
        }
    }

    pub fn size(mut self, rows: u16, cols: u16) -> Self {
        self.size = PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        };
        self
    }

    pub async fn invoke<D: Display>(
        &self,
        argv: &[String],
        session: &mut Session<D>,
    ) -> Result<()> {
        let (program, args) = argv.split_first().context("empty argument vector")?;
        log::info!("running {argv:?}");

        let pair = native_pty_system()
            .openpty(self.size)
            .context("opening pseudo-terminal")?;
        let mut command = CommandBuilder::new(program);
        command.args(args);
        if let Ok(dir) = std::env::current_dir() {
            command.cwd(dir);
        }
        let mut child = pair
            .slave
            .spawn_command(command)
            .with_context(|| format!("starting {program}"))?;
        // Our copy of the slave would keep the reader from seeing EOF.
        drop(pair.slave);

        let mut reader = match pair.master.try_clone_reader() {
            Ok(reader) => reader,
            Err(err) => {
                stop(&mut *child, program);
                return Err(err.context("reading from pseudo-terminal"));
            }
        };
        let (tx, mut rx) = mpsc::channel::<Vec<u8>>(16);
        // A plain thread: a grandchild holding the slave open can keep this read blocked
        // after we are done, and it must not hold up runtime shutdown.
        thread::spawn(move || {
            let mut buf = [0u8; READ_CHUNK];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        if tx.blocking_send(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                    // Linux reports EIO once the child side closes.
                    Err(err) => {
                        log::debug!("pty read ended: {err}");
                        break;
                    }
                }
            }
        });

        loop {
            match tokio::time::timeout(self.quiet_period, rx.recv()).await {
                Ok(Some(chunk)) => session.feed(&chunk),
                Ok(None) => break,
                Err(_) => match child.try_wait() {
                    Ok(Some(_)) => {
                        // Exited, but something else still holds the terminal open.
                        while let Ok(chunk) = rx.try_recv() {
                            session.feed(&chunk);
                        }
                        break;
                    }
                    Ok(None) => {
                        log::info!("{program} is quiet, treating it as waiting for input");
                        child.kill().context("stopping program")?;
                        session.begin_stdin_read();
                        break;
                    }
                    Err(err) => {
                        stop(&mut *child, program);
                        return Err(err).context("checking program status");
                    }
                },
            }
        }

        let status = child.wait().context("waiting for program")?;
        log::debug!("{program} exited with {status:?}");
        Ok(())
    }
}

fn stop(child: &mut (dyn Child + Send + Sync), program: &str) {
    if let Err(err) = child.kill() {
        log::warn!("failed to stop {program}: {err}");
    }
}

#[cfg(test)]
mod test {
    use super::PtyInvoker;
    use crate::display::Transcript;
    use crate::session::{Session, SessionConfig};
    use std::time::Duration;

    #[tokio::test]
    async fn rejects_empty_argv() {
        let mut session = Session::new(SessionConfig::new(""), Transcript::new());
        let result = PtyInvoker::new(Duration::from_millis(10))
            .invoke(&[], &mut session)
            .await;
        assert!(result.is_err());
        assert_eq!(session.display().text(), "");
    }

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[tokio::test]
    async fn streams_output_until_exit() {
        let mut session = Session::new(SessionConfig::new("sh"), Transcript::new());
        PtyInvoker::new(Duration::from_secs(5))
            .invoke(&argv(&["sh", "-c", "printf 'a\\nb'"]), &mut session)
            .await
            .unwrap();
        assert_eq!(session.display().text(), "a\n");
        assert_eq!(session.pending_output(), "b");
        assert!(!session.is_reading_stdin());
    }

    #[tokio::test]
    async fn quiet_program_is_waiting_for_input() {
        let mut session = Session::new(SessionConfig::new("cat"), Transcript::new());
        PtyInvoker::new(Duration::from_millis(50))
            .invoke(&argv(&["cat"]), &mut session)
            .await
            .unwrap();
        assert!(session.is_reading_stdin());
        assert_eq!(session.display().text(), "reading from stdin...\n");
    }

    #[tokio::test]
    async fn background_child_does_not_hold_up_exit() {
        let mut session = Session::new(SessionConfig::new("sh"), Transcript::new());
        let invoker = PtyInvoker::new(Duration::from_millis(200));
        let args = argv(&["sh", "-c", "sleep 5 & echo started"]);
        let invoke = invoker.invoke(&args, &mut session);
        tokio::time::timeout(Duration::from_secs(3), invoke)
            .await
            .expect("invoke hung on the background child")
            .unwrap();
        assert_eq!(session.display().text(), "started\n");
        assert!(!session.is_reading_stdin());
    }
}
