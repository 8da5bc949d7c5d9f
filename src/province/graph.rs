use crate::province::Province;
use petgraph::graph::UnGraph;
use std::collections::HashMap;

/// Строит неориентированный граф соседства по заполненным множествам соседей.
///
/// Вершина — номер провинции, ребро — симметричное касание форм.
#[must_use]
pub fn build_province_graph(provinces: &[Province]) -> UnGraph<u32, ()> {
    let mut graph = UnGraph::new_undirected();
    let mut id_to_node = HashMap::new();

    for province in provinces {
        let node = graph.add_node(province.id);
        id_to_node.insert(province.id, node);
    }

    for province in provinces {
        for &neighbour in &province.neighbours {
            // Отношение симметрично: каждое ребро берём один раз
            if province.id < neighbour {
                graph.add_edge(id_to_node[&province.id], id_to_node[&neighbour], ());
            }
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn edges_are_deduplicated() {
        let grey = Color::new(128, 128, 128);
        let mut a = Province::new(0, grey, (0, 0));
        let mut b = Province::new(1, grey, (5, 0));
        let c = Province::new(2, grey, (9, 9));
        a.neighbours.insert(1);
        b.neighbours.insert(0);
        let graph = build_province_graph(&[a, b, c]);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
    }
}
