// tests/graph_tests.rs
//! Tests voor de graafstructuur en de Matrix-Market/DIMACS-parsers.

use mvcls::error::VcError;
use mvcls::graph::{load_graph, Graph, GraphView};
use std::io::Cursor;

#[test]
fn test_from_edge_list_dedupes_and_drops_loops() {
    let g = Graph::from_edge_list(4, &[(0, 1), (1, 0), (2, 2), (2, 3), (3, 2)]).unwrap();
    assert_eq!(g.n(), 4);
    assert_eq!(g.m(), 2);
    assert_eq!(g.degree(2), 1);
    assert_eq!(g.neighbors(0), &[1]);
    assert_eq!(g.edge(1), (2, 3));
    assert_eq!(g.incident_edges(3), &[1]);
}

#[test]
fn test_from_edge_list_out_of_range() {
    let err = Graph::from_edge_list(3, &[(0, 3)]).unwrap_err();
    assert!(matches!(err, VcError::InvalidGraph(_)));
}

#[test]
fn test_add_edge() {
    let mut g = Graph::with_vertices(3);
    assert!(g.add_edge(0, 2));
    assert!(!g.add_edge(2, 0));
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.vertex_count(), 3);
}

#[test]
fn test_parse_matrix_market() {
    let mtx = "%%MatrixMarket matrix coordinate pattern symmetric\n\
               % een commentaarregel\n\
               4 4 4\n\
               2 1\n\
               3 2\n\
               4 3\n\
               1 4\n";
    let g = Graph::parse_matrix_market(Cursor::new(mtx)).unwrap();
    assert_eq!(g.n(), 4);
    assert_eq!(g.m(), 4);
    assert_eq!(g.degree(0), 2);
    assert_eq!(g.edges()[0], (1, 0));
}

#[test]
fn test_parse_matrix_market_with_values() {
    let mtx = "%%MatrixMarket matrix coordinate real general\n\
               3 3 4\n\
               1 2 0.5\n\
               2 1 0.5\n\
               3 3 1.0\n\
               2 3 2.0\n";
    let g = Graph::parse_matrix_market(Cursor::new(mtx)).unwrap();
    assert_eq!(g.n(), 3);
    // Diagonaal en het symmetrische duplicaat vallen weg
    assert_eq!(g.m(), 2);
}

#[test]
fn test_parse_matrix_market_errors() {
    let array = "%%MatrixMarket matrix array real general\n2 2\n1.0\n";
    assert!(matches!(
        Graph::parse_matrix_market(Cursor::new(array)),
        Err(VcError::InvalidGraph(_))
    ));

    let out_of_range = "%%MatrixMarket matrix coordinate pattern symmetric\n3 3 1\n1 4\n";
    assert!(matches!(
        Graph::parse_matrix_market(Cursor::new(out_of_range)),
        Err(VcError::InvalidGraph(_))
    ));

    let no_size = "%%MatrixMarket matrix coordinate pattern symmetric\n% alleen commentaar\n";
    assert!(matches!(
        Graph::parse_matrix_market(Cursor::new(no_size)),
        Err(VcError::InvalidGraph(_))
    ));

    let garbage = "%%MatrixMarket matrix coordinate pattern symmetric\n3 3 1\n1 x\n";
    assert!(matches!(
        Graph::parse_matrix_market(Cursor::new(garbage)),
        Err(VcError::InvalidGraph(_))
    ));
}

#[test]
fn test_parse_dimacs() {
    let clq = "c voorbeeld\np edge 3 2\ne 1 2\ne 2 3\n";
    let g = Graph::parse_dimacs(Cursor::new(clq)).unwrap();
    assert_eq!(g.n(), 3);
    assert_eq!(g.m(), 2);
    assert_eq!(g.neighbors(1), &[0, 2]);

    let early = "e 1 2\np edge 3 1\n";
    assert!(matches!(
        Graph::parse_dimacs(Cursor::new(early)),
        Err(VcError::InvalidGraph(_))
    ));
}

#[test]
fn test_load_graph_by_extension() {
    let dir = std::env::temp_dir().join(format!("mvcls-graph-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let mtx = dir.join("tiny.mtx");
    std::fs::write(&mtx, "%%MatrixMarket matrix coordinate pattern symmetric\n2 2 1\n2 1\n").unwrap();
    let clq = dir.join("tiny.clq");
    std::fs::write(&clq, "p edge 2 1\ne 1 2\n").unwrap();

    assert_eq!(load_graph(&mtx).unwrap().m(), 1);
    assert_eq!(load_graph(&clq).unwrap().m(), 1);
    assert!(matches!(load_graph(dir.join("ontbreekt.mtx")), Err(VcError::Io(_))));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[should_panic]
fn test_add_edge_self_loop_panics() {
    let mut g = Graph::with_vertices(2);
    g.add_edge(1, 1);
}
