//! Text serialization of a generated edge list.
//!
//! The format is one header line `"n m"` (vertex and edge counts) followed
//! by `m` lines `"tail head"` or `"tail head weight"`, endpoints passed
//! through the configured labeler. The weight column is present exactly
//! when a weight slice is supplied.

use std::io::{self, Write};

use graphforge_core::Adjacency;

use crate::strategy::Labeler;

/// Writes the `"n m"` header and one labelled line per edge.
///
/// When `weights` is supplied it must be parallel to `edges`; surplus
/// weights are ignored.
///
/// # Errors
/// Returns any error raised by the underlying writer.
///
/// # Examples
/// ```
/// use graphforge_cli::{strategy::IotaLabeler, writer::write_edge_list};
/// use graphforge_core::Adjacency;
///
/// let edges = vec![Adjacency::new(1, 0), Adjacency::new(2, 0)];
/// let mut out = Vec::new();
/// write_edge_list(&mut out, 3, &edges, &IotaLabeler::new(1), None)?;
/// assert_eq!(String::from_utf8(out)?, "3 2\n2 1\n3 1\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_edge_list<W: Write>(
    writer: &mut W,
    vertices: usize,
    edges: &[Adjacency],
    labeler: &impl Labeler,
    weights: Option<&[f64]>,
) -> io::Result<()> {
    writeln!(writer, "{} {}", vertices, edges.len())?;
    for (offset, edge) in edges.iter().enumerate() {
        let tail = labeler.label(edge.tail);
        let head = labeler.label(edge.head);
        match weights {
            Some(weights) => writeln!(writer, "{tail} {head} {}", weights[offset])?,
            None => writeln!(writer, "{tail} {head}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StaticLabeler;

    fn rendered(
        vertices: usize,
        edges: &[Adjacency],
        labeler: &impl Labeler,
        weights: Option<&[f64]>,
    ) -> String {
        let mut out = Vec::new();
        write_edge_list(&mut out, vertices, edges, labeler, weights).expect("vec write succeeds");
        String::from_utf8(out).expect("output is UTF-8")
    }

    #[test]
    fn header_counts_vertices_and_edges() {
        let edges = [Adjacency::new(1, 0), Adjacency::new(3, 2)];
        let output = rendered(4, &edges, &StaticLabeler::new(vec![0, 1, 2, 3]), None);
        assert_eq!(output, "4 2\n1 0\n3 2\n");
    }

    #[test]
    fn empty_graph_is_just_the_header() {
        let output = rendered(5, &[], &StaticLabeler::new(vec![0; 5]), None);
        assert_eq!(output, "5 0\n");
    }

    #[test]
    fn labels_replace_vertex_indices() {
        let edges = [Adjacency::new(2, 0)];
        let output = rendered(3, &edges, &StaticLabeler::new(vec![30, 10, 20]), None);
        assert_eq!(output, "3 1\n20 30\n");
    }

    #[test]
    fn weight_column_appears_only_when_supplied() {
        let edges = [Adjacency::new(1, 0), Adjacency::new(2, 1)];
        let labeler = StaticLabeler::new(vec![0, 1, 2]);
        let weights = [0.5, 1.25];
        let output = rendered(3, &edges, &labeler, Some(&weights));
        assert_eq!(output, "3 2\n1 0 0.5\n2 1 1.25\n");

        let bare = rendered(3, &edges, &labeler, None);
        assert!(!bare.contains("0.5"));
    }
}
