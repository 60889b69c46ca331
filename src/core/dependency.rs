//! Sheet-level dependency graph built from cross-sheet formula references

use crate::core::references::ReferenceScanner;
use crate::error::{BookError, BookResult};
use crate::types::WorkbookModel;
use petgraph::algo::{condensation, tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Edge `a -> b` means some formula on sheet `a` reads a cell on sheet `b`
pub struct SheetGraph {
    graph: DiGraph<String, ()>,
}

impl SheetGraph {
    /// Build the graph from every formula in the model. Hyperlinks are not
    /// dependencies and references to unknown sheets are left out.
    pub fn from_model(model: &WorkbookModel) -> BookResult<Self> {
        let scanner = ReferenceScanner::new()?;
        let mut graph = DiGraph::new();
        let mut node_indices: HashMap<&str, NodeIndex> = HashMap::new();

        for name in model.sheet_names() {
            let idx = graph.add_node(name.to_string());
            node_indices.insert(name, idx);
        }

        for sheet in model.sheets() {
            let Some(&from_idx) = node_indices.get(sheet.name()) else {
                continue;
            };
            for (_, cell) in sheet.cells() {
                let Some(formula) = cell.value.formula() else {
                    continue;
                };
                for target in scanner.cross_refs(formula) {
                    if let Some(&to_idx) = node_indices.get(target.sheet.as_str()) {
                        if from_idx != to_idx && graph.find_edge(from_idx, to_idx).is_none() {
                            graph.add_edge(from_idx, to_idx, ());
                        }
                    }
                }
            }
        }

        Ok(Self { graph })
    }

    pub fn sheet_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Sheets this sheet reads from, sorted
    pub fn dependencies_of(&self, sheet: &str) -> Vec<&str> {
        let Some(idx) = self.graph.node_indices().find(|&i| self.graph[i] == sheet) else {
            return Vec::new();
        };
        let mut deps: Vec<&str> = self
            .graph
            .neighbors(idx)
            .map(|n| self.graph[n].as_str())
            .collect();
        deps.sort_unstable();
        deps
    }

    /// Groups of sheets that reference each other in a cycle, each sorted by name
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut names: Vec<String> =
                    component.into_iter().map(|i| self.graph[i].clone()).collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Sheets in an order where every sheet comes after the sheets it reads,
    /// each cycle collapsed into one group
    pub fn evaluation_order(&self) -> BookResult<Vec<Vec<String>>> {
        let condensed = condensation(self.graph.clone(), true);
        let order = toposort(&condensed, None).map_err(|_| {
            BookError::Sheet("Sheet graph still cyclic after condensation".to_string())
        })?;

        // Edges point at dependencies, so the topological order lists
        // dependents first
        Ok(order
            .into_iter()
            .rev()
            .map(|idx| {
                let mut group = condensed[idx].clone();
                group.sort();
                group
            })
            .collect())
    }
}
