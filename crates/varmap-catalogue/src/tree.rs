//! Organ system → group → variable grouping for tree browsing.

use varmap_model::VariableRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode<'a> {
    pub name: &'a str,
    pub records: Vec<&'a VariableRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganSystemNode<'a> {
    pub name: &'a str,
    pub groups: Vec<GroupNode<'a>>,
}

impl OrganSystemNode<'_> {
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}

/// Group records by organ system, then by group, keeping first-seen order at
/// both levels.
pub fn build_tree<'a>(rows: &[&'a VariableRecord]) -> Vec<OrganSystemNode<'a>> {
    let mut tree: Vec<OrganSystemNode<'a>> = Vec::new();
    for &record in rows {
        let system_idx = match tree
            .iter()
            .position(|node| node.name == record.organ_system)
        {
            Some(idx) => idx,
            None => {
                tree.push(OrganSystemNode {
                    name: &record.organ_system,
                    groups: Vec::new(),
                });
                tree.len() - 1
            }
        };
        let groups = &mut tree[system_idx].groups;
        match groups.iter_mut().find(|g| g.name == record.group) {
            Some(group) => group.records.push(record),
            None => groups.push(GroupNode {
                name: &record.group,
                records: vec![record],
            }),
        }
    }
    tree
}
