use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(BranchId);
id_newtype!(PersonId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
}

impl Branch {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: BranchId(id),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub branch: String,
}

impl Person {
    pub fn new(id: i64, name: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            id: PersonId(id),
            name: name.into(),
            branch: branch.into(),
        }
    }
}

/// Personnel selectable once `branch` is chosen, in directory order.
pub fn personnel_in_branch<'a>(personnel: &'a [Person], branch: &str) -> Vec<&'a Person> {
    personnel.iter().filter(|p| p.branch == branch).collect()
}

pub fn sort_branches_by_name(branches: &mut [Branch]) {
    branches.sort_by(|a, b| a.name.cmp(&b.name));
}

pub fn sort_personnel_by_name(personnel: &mut [Person]) {
    personnel.sort_by(|a, b| a.name.cmp(&b.name));
}
