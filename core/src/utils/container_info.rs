use serde_json::json;

/// Number of elements in a container and the size of one element in bytes
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ContainerSize {
    pub count: usize,
    pub element_size: usize,
}

enum ContainerInfoEntry {
    Leaf(ContainerSize),
    Node(ContainerInfo),
}

/// Memory usage report of a component, as a tree of named containers
#[derive(Default)]
pub struct ContainerInfo(Vec<(String, ContainerInfoEntry)>);

impl ContainerInfo {
    pub fn builder() -> ContainerInfosBuilder {
        ContainerInfosBuilder(ContainerInfo::default())
    }

    /// Finds a leaf by its path, e.g. `["scheduler", "insert_queue"]`
    pub fn leaf(&self, path: &[&str]) -> Option<ContainerSize> {
        let (first, rest) = path.split_first()?;
        let entry = self
            .0
            .iter()
            .find(|(name, _)| name == first)
            .map(|(_, entry)| entry)?;
        match (entry, rest.is_empty()) {
            (ContainerInfoEntry::Leaf(size), true) => Some(*size),
            (ContainerInfoEntry::Node(children), false) => children.leaf(rest),
            _ => None,
        }
    }

    pub fn into_json(self) -> serde_json::Value {
        let mut data = serde_json::Map::new();
        for (name, entry) in self.0 {
            let value = match entry {
                ContainerInfoEntry::Leaf(size) => json!({
                    "count": size.count.to_string(),
                    "size": size.element_size.to_string()
                }),
                ContainerInfoEntry::Node(children) => children.into_json(),
            };
            data.insert(name, value);
        }
        serde_json::Value::Object(data)
    }
}

pub struct ContainerInfosBuilder(ContainerInfo);

impl ContainerInfosBuilder {
    pub fn leaf(mut self, name: impl Into<String>, count: usize, element_size: usize) -> Self {
        self.0 .0.push((
            name.into(),
            ContainerInfoEntry::Leaf(ContainerSize {
                count,
                element_size,
            }),
        ));
        self
    }

    pub fn node(mut self, name: impl Into<String>, infos: ContainerInfo) -> Self {
        self.0 .0.push((name.into(), ContainerInfoEntry::Node(infos)));
        self
    }

    pub fn finish(self) -> ContainerInfo {
        self.0
    }
}

impl<const N: usize> From<[(&'static str, usize, usize); N]> for ContainerInfo {
    fn from(value: [(&'static str, usize, usize); N]) -> Self {
        let mut builder = ContainerInfo::builder();
        for (name, count, element_size) in value {
            builder = builder.leaf(name, count, element_size);
        }
        builder.finish()
    }
}
