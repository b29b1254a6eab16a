use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sysinfo::Pid as SysinfoPid;

use crate::process::errors::ProcessError;

/// Platform-safe process ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(u32);

impl Pid {
    pub fn new(pid: u32) -> Result<Self, ProcessError> {
        if pid == 0 {
            return Err(ProcessError::InvalidPid { pid });
        }
        Ok(Self(pid))
    }

    pub fn from_raw(pid: u32) -> Self {
        Self(pid)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn to_sysinfo_pid(&self) -> SysinfoPid {
        SysinfoPid::from_u32(self.0)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Pid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u32 = s
            .trim()
            .parse()
            .map_err(|e| format!("'{}' is not a valid PID: {}", s.trim(), e))?;
        Pid::new(raw).map_err(|e| e.to_string())
    }
}

/// A target process plus its descendants.
///
/// Computed once when a session starts and only read afterwards. Used to
/// decide whether a window belongs to the target: terminal emulators often
/// own the window through a child or helper process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTree {
    root: Pid,
    descendants: HashSet<Pid>,
}

impl ProcessTree {
    pub fn new(root: Pid, mut descendants: HashSet<Pid>) -> Self {
        descendants.remove(&root);
        Self { root, descendants }
    }

    /// A tree containing only the root process.
    pub fn root_only(root: Pid) -> Self {
        Self::new(root, HashSet::new())
    }

    pub fn root(&self) -> Pid {
        self.root
    }

    pub fn descendants(&self) -> &HashSet<Pid> {
        &self.descendants
    }

    pub fn contains(&self, pid: Pid) -> bool {
        pid == self.root || self.descendants.contains(&pid)
    }

    /// Root first, then descendants in ascending order.
    pub fn members(&self) -> Vec<Pid> {
        let mut rest: Vec<Pid> = self.descendants.iter().copied().collect();
        rest.sort();
        let mut members = Vec::with_capacity(rest.len() + 1);
        members.push(self.root);
        members.extend(rest);
        members
    }

    pub fn len(&self) -> usize {
        self.descendants.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pid_rejects_zero() {
        assert!(matches!(Pid::new(0), Err(ProcessError::InvalidPid { pid: 0 })));
        assert_eq!(Pid::new(7).unwrap().as_u32(), 7);
    }

    #[test]
    fn test_pid_parse() {
        assert_eq!(" 1234 ".parse::<Pid>(), Ok(Pid::from_raw(1234)));
        assert!("abc".parse::<Pid>().is_err());
        assert!("0".parse::<Pid>().is_err());
        assert!("-3".parse::<Pid>().is_err());
    }

    #[test]
    fn test_process_tree_membership() {
        let tree = ProcessTree::new(
            Pid::from_raw(10),
            HashSet::from([Pid::from_raw(12), Pid::from_raw(11), Pid::from_raw(10)]),
        );
        assert!(tree.contains(Pid::from_raw(10)));
        assert!(tree.contains(Pid::from_raw(11)));
        assert!(!tree.contains(Pid::from_raw(13)));
        assert_eq!(tree.len(), 3);
        assert_eq!(
            tree.members(),
            vec![Pid::from_raw(10), Pid::from_raw(11), Pid::from_raw(12)]
        );
    }

    #[test]
    fn test_root_only_tree() {
        let tree = ProcessTree::root_only(Pid::from_raw(5));
        assert!(tree.contains(Pid::from_raw(5)));
        assert!(tree.descendants().is_empty());
        assert_eq!(tree.members(), vec![Pid::from_raw(5)]);
    }
}
