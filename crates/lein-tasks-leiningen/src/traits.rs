//! Leiningen runner trait

use lein_tasks_core::error::Result;

use crate::args::{
    BikeshedArgs, CheckArgs, CljfmtArgs, CljstyleArgs, EastwoodArgs, EftestArgs, KibitArgs,
    ReleaseArgs, RunArgs, UberjarArgs,
};
use crate::command::LeinCall;

/// Runs Leiningen plugin commands on behalf of tasks
///
/// Implementors only need [`Leiningen::execute`]; the per-command methods
/// wrap their arguments into a [`LeinCall`].
pub trait Leiningen: Send + Sync {
    /// Run a single Leiningen invocation in the current directory
    fn execute(&self, call: LeinCall) -> Result<()>;

    /// Lint with eastwood
    fn eastwood(&self, args: EastwoodArgs) -> Result<()> {
        self.execute(LeinCall::Eastwood(args))
    }

    /// Compile all namespaces, warning on reflection
    fn check(&self, args: CheckArgs) -> Result<()> {
        self.execute(LeinCall::Check(args))
    }

    /// Suggest or apply idiomatic rewrites with kibit
    fn kibit(&self, args: KibitArgs) -> Result<()> {
        self.execute(LeinCall::Kibit(args))
    }

    /// Check or fix formatting with cljfmt
    fn cljfmt(&self, args: CljfmtArgs) -> Result<()> {
        self.execute(LeinCall::Cljfmt(args))
    }

    /// Look for bad code with bikeshed
    fn bikeshed(&self, args: BikeshedArgs) -> Result<()> {
        self.execute(LeinCall::Bikeshed(args))
    }

    /// Check or fix style with cljstyle
    fn cljstyle(&self, args: CljstyleArgs) -> Result<()> {
        self.execute(LeinCall::Cljstyle(args))
    }

    /// Build a standalone uberjar
    fn uberjar(&self, args: UberjarArgs) -> Result<()> {
        self.execute(LeinCall::Uberjar(args))
    }

    /// Release the library
    fn release(&self, args: ReleaseArgs) -> Result<()> {
        self.execute(LeinCall::Release(args))
    }

    /// Run the application
    fn run(&self, args: RunArgs) -> Result<()> {
        self.execute(LeinCall::Run(args))
    }

    /// Run tests with eftest
    fn eftest(&self, args: EftestArgs) -> Result<()> {
        self.execute(LeinCall::Eftest(args))
    }
}
