use std::collections::{HashMap, HashSet, VecDeque};

use sysinfo::{ProcessesToUpdate, System};
use tracing::debug;

use crate::process::errors::ProcessError;
use crate::process::types::Pid;

/// Check if a process with the given PID is currently running
pub fn is_process_running(pid: Pid) -> Result<bool, ProcessError> {
    let mut system = System::new();
    let pid_obj = pid.to_sysinfo_pid();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid_obj]), true);
    Ok(system.process(pid_obj).is_some())
}

/// All transitive children of `pid`, excluding `pid` itself.
///
/// Takes one process table snapshot and walks parent links from it, so the
/// result is consistent even while processes come and go.
pub fn descendant_processes(pid: Pid) -> Result<HashSet<Pid>, ProcessError> {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);

    if system.process(pid.to_sysinfo_pid()).is_none() {
        return Err(ProcessError::NotFound { pid: pid.as_u32() });
    }

    let links = system.processes().iter().map(|(child, process)| {
        (
            Pid::from_raw(child.as_u32()),
            process.parent().map(|p| Pid::from_raw(p.as_u32())),
        )
    });

    let descendants = collect_descendants(pid, links);
    debug!(
        event = "core.process.descendants_collected",
        pid = pid.as_u32(),
        count = descendants.len()
    );
    Ok(descendants)
}

/// Breadth-first walk over `(child, parent)` links starting at `root`.
fn collect_descendants(
    root: Pid,
    links: impl IntoIterator<Item = (Pid, Option<Pid>)>,
) -> HashSet<Pid> {
    let mut children: HashMap<Pid, Vec<Pid>> = HashMap::new();
    for (child, parent) in links {
        if let Some(parent) = parent
            && parent != child
        {
            children.entry(parent).or_default().push(child);
        }
    }

    let mut found = HashSet::new();
    let mut queue = VecDeque::from([root]);
    while let Some(current) = queue.pop_front() {
        for &child in children.get(&current).into_iter().flatten() {
            if child != root && found.insert(child) {
                queue.push_back(child);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::{Command, Stdio};

    fn pid(raw: u32) -> Pid {
        Pid::from_raw(raw)
    }

    #[test]
    fn test_is_process_running_with_invalid_pid() {
        let result = is_process_running(pid(999_999_999));
        assert!(result.is_ok());
        assert!(!result.unwrap());
    }

    #[test]
    fn test_is_process_running_self() {
        assert!(is_process_running(pid(std::process::id())).unwrap());
    }

    #[test]
    fn test_descendant_processes_unknown_pid() {
        let result = descendant_processes(pid(999_999_999));
        assert!(matches!(
            result,
            Err(ProcessError::NotFound { pid: 999_999_999 })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_descendant_processes_finds_spawned_child() {
        let mut child = Command::new("sleep")
            .arg("10")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn test process");

        let descendants =
            descendant_processes(pid(std::process::id())).expect("Failed to walk process tree");
        assert!(descendants.contains(&pid(child.id())));
        assert!(!descendants.contains(&pid(std::process::id())));

        let _ = child.kill();
        let _ = child.wait();
    }

    #[test]
    fn test_collect_descendants_walks_generations() {
        let links = vec![
            (pid(2), Some(pid(1))),
            (pid(3), Some(pid(2))),
            (pid(4), Some(pid(3))),
            (pid(5), Some(pid(1))),
            (pid(9), Some(pid(8))),
            (pid(8), None),
        ];
        let found = collect_descendants(pid(1), links);
        assert_eq!(found, HashSet::from([pid(2), pid(3), pid(4), pid(5)]));
    }

    #[test]
    fn test_collect_descendants_survives_cycles() {
        // Parent links can be momentarily inconsistent when PIDs are reused.
        let links = vec![
            (pid(2), Some(pid(1))),
            (pid(1), Some(pid(2))),
            (pid(3), Some(pid(3))),
        ];
        let found = collect_descendants(pid(1), links);
        assert_eq!(found, HashSet::from([pid(2)]));
    }

    #[test]
    fn test_collect_descendants_leaf() {
        let links = vec![(pid(2), Some(pid(1)))];
        assert!(collect_descendants(pid(2), links).is_empty());
    }
}
