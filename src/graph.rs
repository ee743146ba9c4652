//! src/graph.rs
//!
//! Representeert een onveranderlijke, ongerichte graaf als adjacency-lijst met
//! een expliciete kantenlijst. Elke kant heeft een vaste id (zijn positie in de
//! kantenlijst), zodat `CoverState` de set onbedekte kanten in O(1) per kant
//! kan bijhouden. Ondersteunt het parsen van het Matrix-Market coördinaatformaat
//! en het DIMACS *.clq-formaat.

use crate::error::{VcError, VcResult};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Leescapaciteiten die de zoekalgoritmes van een graaf nodig hebben.
///
/// Knopen zijn aaneengesloten ids `[0, vertex_count)`. Kanten hebben ids
/// `[0, edge_count)`; `incident_edges(v)[i]` is de kant naar `neighbors(v)[i]`.
pub trait GraphView {
    fn vertex_count(&self) -> usize;
    fn edge_count(&self) -> usize;
    fn neighbors(&self, v: usize) -> &[usize];
    fn incident_edges(&self, v: usize) -> &[usize];
    fn edge(&self, e: usize) -> (usize, usize);

    #[inline]
    fn degree(&self, v: usize) -> usize {
        self.neighbors(v).len()
    }
}

/// Een ongerichte graaf, opgeslagen als adjacency-lijst.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// `adj[v]` bevat de buren van `v`.
    adj: Vec<Vec<usize>>,
    /// `adj_edges[v][i]` is de id van de kant `(v, adj[v][i])`.
    adj_edges: Vec<Vec<usize>>,
    /// Elke ongerichte kant precies één keer, in invoervolgorde.
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /*────────── Constructors ──────────*/

    /// Creëert een lege graaf met `n` geïsoleerde knopen.
    pub fn with_vertices(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
            adj_edges: vec![Vec::new(); n],
            edges: Vec::new(),
        }
    }

    /// Bouwt een graaf op basis van een expliciete lijst van kanten (0-gebaseerde indices).
    ///
    /// Zelf-lussen worden genegeerd en dubbele kanten (ook `(v,u)` na `(u,v)`)
    /// samengevoegd. Een index buiten `[0, n)` geeft `InvalidGraph`.
    pub fn from_edge_list(n: usize, edges: &[(usize, usize)]) -> VcResult<Self> {
        let mut g = Self::with_vertices(n);
        let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(edges.len());
        for &(u, v) in edges {
            if u >= n || v >= n {
                return Err(VcError::InvalidGraph(format!(
                    "kant ({u}, {v}) buiten bereik voor n={n}"
                )));
            }
            if u == v || !seen.insert((u.min(v), u.max(v))) {
                continue;
            }
            g.push_edge(u, v);
        }
        Ok(g)
    }

    /// Parset het Matrix-Market coördinaatformaat (`%%MatrixMarket matrix coordinate ...`).
    ///
    /// Het aantal knopen is het aantal rijen; elke niet-diagonale entry `i j [waarde]`
    /// wordt een ongerichte kant. Zowel `symmetric` als `general` matrices worden
    /// geaccepteerd omdat duplicaten samengevoegd worden.
    pub fn parse_matrix_market<R: Read>(reader: R) -> VcResult<Self> {
        let mut size: Option<(usize, usize)> = None;
        let mut edges: Vec<(usize, usize)> = Vec::new();

        for (line_no, line_result) in BufReader::new(reader).lines().enumerate() {
            let line = line_result?;
            let line = line.trim();

            if line_no == 0 && line.starts_with("%%MatrixMarket") {
                let banner = line.to_ascii_lowercase();
                if !banner.contains("coordinate") {
                    return Err(VcError::InvalidGraph(
                        "alleen het coordinate-formaat wordt ondersteund".into(),
                    ));
                }
                continue;
            }
            if line.is_empty() || line.starts_with('%') {
                continue;
            }

            let parts: Vec<_> = line.split_whitespace().collect();
            match size {
                None => {
                    if parts.len() < 3 {
                        return Err(VcError::InvalidGraph(format!(
                            "ongeldige dimensieregel: '{line}'"
                        )));
                    }
                    let rows = parse_index(parts[0])?;
                    let cols = parse_index(parts[1])?;
                    let nnz = parse_index(parts[2])?;
                    edges.reserve(nnz);
                    size = Some((rows, cols));
                }
                Some((rows, cols)) => {
                    if parts.len() < 2 {
                        return Err(VcError::InvalidGraph(format!(
                            "ongeldige entry op regel {}: '{line}'",
                            line_no + 1
                        )));
                    }
                    let i = parse_index(parts[0])?;
                    let j = parse_index(parts[1])?;
                    // Matrix-Market is 1-gebaseerd, wij zijn 0-gebaseerd
                    if i == 0 || j == 0 || i > rows || j > cols || j > rows {
                        return Err(VcError::InvalidGraph(format!(
                            "entry ({i}, {j}) buiten bereik voor {rows}x{cols}"
                        )));
                    }
                    // Expliciet opgeslagen nullen zijn geen kanten.
                    if let Some(value) = parts.get(2).and_then(|t| t.parse::<f64>().ok()) {
                        if value == 0.0 {
                            continue;
                        }
                    }
                    edges.push((i - 1, j - 1));
                }
            }
        }

        let (rows, _) =
            size.ok_or_else(|| VcError::InvalidGraph("dimensieregel ontbreekt".into()))?;
        Self::from_edge_list(rows, &edges)
    }

    /// Parset het DIMACS *.clq formaat vanuit een reader.
    pub fn parse_dimacs<R: Read>(reader: R) -> VcResult<Self> {
        let mut n = 0usize;
        let mut edges: Vec<(usize, usize)> = Vec::new();
        let mut header_found = false;

        for line_result in BufReader::new(reader).lines() {
            let line = line_result?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('c') {
                continue;
            }

            let parts: Vec<_> = line.split_whitespace().collect();
            match parts[0] {
                "p" if parts.len() >= 4 && parts[1] == "edge" => {
                    n = parse_index(parts[2])?;
                    edges.reserve(parse_index(parts[3])?);
                    header_found = true;
                }
                "e" if parts.len() >= 3 => {
                    if !header_found {
                        return Err(VcError::InvalidGraph(
                            "kantregel 'e' gevonden vóór probleemregel 'p'".into(),
                        ));
                    }
                    let u = parse_index(parts[1])?;
                    let v = parse_index(parts[2])?;
                    if u == 0 || v == 0 || u > n || v > n {
                        return Err(VcError::InvalidGraph(format!(
                            "kant ({u}, {v}) buiten bereik voor n={n}"
                        )));
                    }
                    edges.push((u - 1, v - 1)); // DIMACS is 1-gebaseerd
                }
                _ => { /* Negeer andere regels */ }
            }
        }
        Self::from_edge_list(n, &edges)
    }

    /*────────── Getters ──────────*/

    /// Geeft de kantenlijst terug, elke kant eenmaal, in invoervolgorde.
    #[inline]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Geeft het aantal knopen terug (kortschrift zoals `n` in de literatuur).
    #[inline]
    pub fn n(&self) -> usize {
        self.adj.len()
    }

    /// Geeft het aantal kanten terug.
    #[inline]
    pub fn m(&self) -> usize {
        self.edges.len()
    }

    /*────────── Mutators ──────────*/

    /// Voegt een ongerichte kant toe tussen `u` en `v`. Geeft `false` terug als
    /// de kant al bestond.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        assert!(u < self.n() && v < self.n() && u != v, "Knoopindex buiten bereik of zelf-lus");
        if self.adj[u].contains(&v) {
            return false;
        }
        self.push_edge(u, v);
        true
    }

    fn push_edge(&mut self, u: usize, v: usize) {
        let id = self.edges.len();
        self.edges.push((u, v));
        self.adj[u].push(v);
        self.adj_edges[u].push(id);
        self.adj[v].push(u);
        self.adj_edges[v].push(id);
    }
}

impl GraphView for Graph {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    #[inline]
    fn incident_edges(&self, v: usize) -> &[usize] {
        &self.adj_edges[v]
    }

    #[inline]
    fn edge(&self, e: usize) -> (usize, usize) {
        self.edges[e]
    }
}

/// Laadt een graaf van schijf. `.clq`/`.dimacs`/`.col` worden als DIMACS gelezen,
/// al het andere als Matrix-Market.
pub fn load_graph<P: AsRef<Path>>(path: P) -> VcResult<Graph> {
    let path = path.as_ref();
    let file = File::open(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("clq") | Some("dimacs") | Some("col") => Graph::parse_dimacs(file),
        _ => Graph::parse_matrix_market(file),
    }
}

fn parse_index(token: &str) -> VcResult<usize> {
    token
        .parse()
        .map_err(|e| VcError::InvalidGraph(format!("'{token}' is geen geldig getal: {e}")))
}
