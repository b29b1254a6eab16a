use tracing::{debug, info, warn};

use crate::process::{Pid, ProcessTree};
use crate::window::errors::WindowError;
use crate::window::traits::WindowHandle;

/// Find the first window owned by any process in `tree`, with its owner.
///
/// Windows whose owner cannot be determined are skipped. A failed
/// enumeration is logged and treated as "no window".
pub fn locate(
    tree: &ProcessTree,
    windows: Result<Vec<Box<dyn WindowHandle>>, WindowError>,
) -> Option<(Pid, Box<dyn WindowHandle>)> {
    info!(
        event = "core.window.locate_started",
        pid = tree.root().as_u32(),
        tree_size = tree.len()
    );

    let windows = match windows {
        Ok(windows) => windows,
        Err(e) => {
            warn!(
                event = "core.window.enumeration_failed",
                pid = tree.root().as_u32(),
                error = %e
            );
            return None;
        }
    };

    let total = windows.len();
    let mut skipped = 0usize;

    for window in windows {
        let owner = match window.owning_process() {
            Ok(owner) => owner,
            Err(e) => {
                debug!(
                    event = "core.window.window_skipped",
                    reason = "owner_unavailable",
                    window_id = window.id(),
                    error = %e
                );
                skipped += 1;
                continue;
            }
        };

        if tree.contains(owner) {
            info!(
                event = "core.window.locate_completed",
                pid = tree.root().as_u32(),
                owner = owner.as_u32(),
                window_id = window.id(),
                title = ?window.title()
            );
            return Some((owner, window));
        }
    }

    info!(
        event = "core.window.locate_not_found",
        pid = tree.root().as_u32(),
        checked = total,
        skipped = skipped
    );
    None
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::test_support::{CallLog, FakeWindow};

    fn boxed(window: FakeWindow) -> Box<dyn WindowHandle> {
        Box::new(window)
    }

    #[test]
    fn test_locate_matches_descendant_owner() {
        let log = CallLog::default();
        let tree = ProcessTree::new(
            Pid::from_raw(100),
            HashSet::from([Pid::from_raw(101), Pid::from_raw(102)]),
        );
        let windows = vec![
            boxed(FakeWindow::new(1, Some(50), &log)),
            boxed(FakeWindow::new(2, Some(102), &log)),
            boxed(FakeWindow::new(3, Some(100), &log)),
        ];

        let (owner, found) = locate(&tree, Ok(windows)).expect("window should be found");
        assert_eq!(found.id(), 2);
        assert_eq!(owner, Pid::from_raw(102));
    }

    #[test]
    fn test_locate_skips_windows_without_owner() {
        let log = CallLog::default();
        let tree = ProcessTree::root_only(Pid::from_raw(7));
        let windows = vec![
            boxed(FakeWindow::new(1, None, &log)),
            boxed(FakeWindow::new(2, Some(7), &log)),
        ];

        let (owner, found) = locate(&tree, Ok(windows)).expect("window should be found");
        assert_eq!(found.id(), 2);
        assert_eq!(owner, Pid::from_raw(7));
    }

    #[test]
    fn test_locate_returns_none_when_nothing_matches() {
        let log = CallLog::default();
        let tree = ProcessTree::root_only(Pid::from_raw(7));
        let windows = vec![
            boxed(FakeWindow::new(1, Some(8), &log)),
            boxed(FakeWindow::new(2, None, &log)),
        ];
        assert!(locate(&tree, Ok(windows)).is_none());
    }

    #[test]
    fn test_locate_treats_enumeration_failure_as_absent() {
        let tree = ProcessTree::root_only(Pid::from_raw(7));
        let result = locate(
            &tree,
            Err(WindowError::EnumerationFailed {
                message: "no display".to_string(),
            }),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_locate_is_a_pure_query() {
        let log = CallLog::default();
        let tree = ProcessTree::root_only(Pid::from_raw(7));
        let windows = vec![boxed(FakeWindow::new(1, Some(7), &log))];
        let _ = locate(&tree, Ok(windows));
        assert!(log.entries().is_empty());
    }
}
