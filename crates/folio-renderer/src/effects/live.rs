//! Wandering nodes linked to their near neighbors.

use std::collections::BTreeSet;

use folio_common::types::{BackgroundEffect, Color, Viewport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Effect, FrameContext, InitContext};
use crate::settings::RenderSettings;
use crate::surface::Canvas;

/// Nodes linked when closer than this (surface pixels).
pub const LINK_DISTANCE: f32 = 120.0;
pub const POINTER_RADIUS: f32 = 150.0;
/// Chance per frame of recomputing neighbor sets.
const RELINK_PROBABILITY: f64 = 1.0 / 20.0;
const DAMPING: f32 = 0.99;
const JITTER: f32 = 0.05;
const REPULSION: f32 = 0.6;
const MAX_VELOCITY: f32 = 2.0;
const NODES_PER_DENSITY: u32 = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub radius: f32,
    pub color: Color,
    pub neighbors: BTreeSet<usize>,
}

pub struct NodeGraph {
    nodes: Vec<Node>,
    rng: StdRng,
    pointer: Option<[f32; 2]>,
    size: (u32, u32),
    speed: f32,
    interactive: bool,
    edge_color: Color,
    opacity: f32,
}

pub(super) fn init(settings: &RenderSettings, ctx: &mut InitContext<'_>) -> Box<dyn Effect> {
    let rng = StdRng::seed_from_u64(ctx.rng.gen());
    Box::new(NodeGraph::new(settings, ctx.viewport, rng))
}

impl NodeGraph {
    pub fn new(settings: &RenderSettings, viewport: Viewport, mut rng: StdRng) -> Self {
        let size = viewport.pixel_size();
        let (w, h) = (size.0.max(1) as f32, size.1.max(1) as f32);
        let count = (settings.density / NODES_PER_DENSITY).clamp(12, 200);

        let nodes = (0..count)
            .map(|_| Node {
                position: [rng.gen_range(0.0..w), rng.gen_range(0.0..h)],
                velocity: [rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)],
                radius: rng.gen_range(1.5..3.5),
                color: settings.primary.lerp(settings.secondary, rng.gen_range(0.0..0.5)),
                neighbors: BTreeSet::new(),
            })
            .collect();

        let mut graph = Self {
            nodes,
            rng,
            pointer: None,
            size,
            speed: settings.speed,
            interactive: settings.interactive,
            edge_color: settings.primary,
            opacity: settings.opacity,
        };
        graph.update_connections();
        graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Rebuild every neighbor set from current positions.
    pub fn update_connections(&mut self) {
        for node in &mut self.nodes {
            node.neighbors.clear();
        }
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                if distance(self.nodes[i].position, self.nodes[j].position) < LINK_DISTANCE {
                    self.nodes[i].neighbors.insert(j);
                    self.nodes[j].neighbors.insert(i);
                }
            }
        }
    }

    fn step_node(&mut self, index: usize) {
        let jitter = [
            self.rng.gen_range(-JITTER..JITTER) * self.speed,
            self.rng.gen_range(-JITTER..JITTER) * self.speed,
        ];
        let pointer = self.pointer.filter(|_| self.interactive);
        let (w, h) = (self.size.0 as f32, self.size.1 as f32);
        let speed = self.speed;
        let node = &mut self.nodes[index];

        node.velocity[0] += jitter[0];
        node.velocity[1] += jitter[1];

        if let Some([px, py]) = pointer {
            let (dx, dy) = (node.position[0] - px, node.position[1] - py);
            let d = (dx * dx + dy * dy).sqrt();
            if d < POINTER_RADIUS && d > f32::EPSILON {
                let force = (1.0 - d / POINTER_RADIUS) * REPULSION;
                node.velocity[0] += dx / d * force;
                node.velocity[1] += dy / d * force;
            }
        }

        node.velocity[0] *= DAMPING;
        node.velocity[1] *= DAMPING;
        let v = (node.velocity[0].powi(2) + node.velocity[1].powi(2)).sqrt();
        if v > MAX_VELOCITY {
            node.velocity[0] *= MAX_VELOCITY / v;
            node.velocity[1] *= MAX_VELOCITY / v;
        }

        node.position[0] += node.velocity[0] * speed;
        node.position[1] += node.velocity[1] * speed;
        bounce(&mut node.position[0], &mut node.velocity[0], w);
        bounce(&mut node.position[1], &mut node.velocity[1], h);
    }
}

fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

fn bounce(position: &mut f32, velocity: &mut f32, limit: f32) {
    if *position < 0.0 {
        *position = 0.0;
        *velocity = velocity.abs();
    } else if *position > limit {
        *position = limit;
        *velocity = -velocity.abs();
    }
}

impl Effect for NodeGraph {
    fn kind(&self) -> BackgroundEffect {
        BackgroundEffect::Live
    }

    fn update(&mut self, _frame: &FrameContext) {
        for i in 0..self.nodes.len() {
            self.step_node(i);
        }
        if self.rng.gen_bool(RELINK_PROBABILITY) {
            self.update_connections();
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport.pixel_size();
        let (w, h) = (self.size.0 as f32, self.size.1 as f32);
        for node in &mut self.nodes {
            node.position[0] = node.position[0].clamp(0.0, w);
            node.position[1] = node.position[1].clamp(0.0, h);
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for (i, node) in self.nodes.iter().enumerate() {
            for &j in node.neighbors.range((i + 1)..) {
                let other = &self.nodes[j];
                let d = distance(node.position, other.position);
                let alpha = (1.0 - d / LINK_DISTANCE).max(0.0) * 0.5 * self.opacity;
                if alpha > 0.0 {
                    let (a, b) = (node.position, other.position);
                    canvas.draw_line((a[0], a[1]), (b[0], b[1]), self.edge_color.with_alpha(alpha));
                }
            }
        }
        for node in &self.nodes {
            let [x, y] = node.position;
            canvas.fill_glow(x, y, node.radius * 4.0, node.color.with_alpha(0.35 * self.opacity));
            canvas.fill_circle(x, y, node.radius, node.color.with_alpha(self.opacity));
        }
    }

    fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Some([x, y]);
    }

    fn pointer_left(&mut self) {
        self.pointer = None;
    }

    fn teardown(&mut self) {
        self.nodes = Vec::new();
        self.pointer = None;
    }
}
