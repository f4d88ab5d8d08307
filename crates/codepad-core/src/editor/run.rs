//! Run menu handler.

use super::Editor;
use crate::host::Host;
use crate::runner::RunOutcome;

const RULE_WIDTH: usize = 50;
pub(crate) const INVALID_CODE: &str = "ERROR!......... Invalid Code";

impl<H: Host> Editor<H> {
    /// Runs the window body through the module runner and frames its
    /// output in the output pane. A fault prints one fixed line; stdout
    /// produced before the fault is kept.
    pub fn run_module(&mut self) {
        let outcome = self.runner.run(self.window.body());
        if outcome == RunOutcome::Disabled {
            self.out.println(format_args!(
                "Run Module is disabled. Set \"run_module.enabled\" in codepad.json to allow it.\n"
            ));
            return;
        }

        let rule = ".".repeat(RULE_WIDTH);
        let info = self.store.get().info.clone();
        self.out.println(format_args!("{rule}"));
        self.out
            .println(format_args!("Running session :: {info}\n"));

        let failed = outcome.is_failure();
        let (stdout, truncated) = match outcome {
            RunOutcome::Completed { stdout, truncated } => (stdout, truncated),
            RunOutcome::Failed {
                stdout,
                truncated,
                reason,
            } => {
                tracing::debug!(?reason, "Module failed");
                (stdout, truncated)
            }
            RunOutcome::Disabled => return,
        };
        self.out.write_text(&stdout);
        if !stdout.is_empty() && !stdout.ends_with('\n') {
            self.out.write_text("\n");
        }
        if truncated {
            self.out.println(format_args!("[output truncated]"));
        }
        if failed {
            self.out.println(format_args!("{INVALID_CODE}"));
        }
        self.out.println(format_args!("{rule}"));
    }
}
