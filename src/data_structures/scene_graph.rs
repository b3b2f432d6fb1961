//! Scene graph and draw traversal.
//!
//! A [`SceneNode`] is a local transform (an ordered list of translate,
//! rotate and scale steps), an optional drawable [`Part`] and a list of
//! children. Models build a fresh tree every frame from their animation
//! state; [`traverse`] walks it against a [`MatrixStack`], scoping every node
//! in its own push/pop pair, and records one draw call per part.

use cgmath::{Deg, Vector3};

use crate::{
    data_structures::{batch::BatchHandle, material::Material, matrix_stack::MatrixStack},
    render::{DrawCall, DrawList, Pass},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    Translate(Vector3<f32>),
    Rotate(Deg<f32>, Vector3<f32>),
    Scale(Vector3<f32>),
}

impl Transform {
    pub fn apply(&self, stack: &mut MatrixStack) {
        match self {
            Transform::Translate(v) => stack.translate(v.x, v.y, v.z),
            Transform::Rotate(angle, axis) => stack.rotate(*angle, *axis),
            Transform::Scale(v) => stack.scale(v.x, v.y, v.z),
        }
    }
}

/// A batch drawn with a material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub batch: BatchHandle,
    pub material: Material,
}

#[derive(Clone, Debug, Default)]
pub struct SceneNode {
    pub name: &'static str,
    pub transforms: Vec<Transform>,
    pub part: Option<Part>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// A node with no geometry of its own.
    pub fn group(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn part(name: &'static str, batch: BatchHandle, material: Material) -> Self {
        Self {
            name,
            part: Some(Part { batch, material }),
            ..Default::default()
        }
    }

    pub fn translate(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transforms
            .push(Transform::Translate(Vector3::new(x, y, z)));
        self
    }

    pub fn rotate(mut self, degrees: f32, x: f32, y: f32, z: f32) -> Self {
        self.transforms
            .push(Transform::Rotate(Deg(degrees), Vector3::new(x, y, z)));
        self
    }

    pub fn scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transforms.push(Transform::Scale(Vector3::new(x, y, z)));
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Number of parts in this subtree.
    pub fn part_count(&self) -> usize {
        self.part.iter().count()
            + self
                .children
                .iter()
                .map(SceneNode::part_count)
                .sum::<usize>()
    }

    /// Depth-first search by name.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

/// Records `node` and its subtree into `out` under the current top of
/// `stack`. The stack is left exactly as deep as it was found.
pub fn traverse(node: &SceneNode, stack: &mut MatrixStack, pass: Pass, out: &mut DrawList) {
    stack.scoped(|stack| {
        for transform in &node.transforms {
            transform.apply(stack);
        }
        if let Some(part) = node.part {
            out.push(DrawCall {
                pass,
                batch: part.batch,
                material: part.material,
                model_view: stack.top(),
            });
        }
        for child in &node.children {
            traverse(child, stack, pass, out);
        }
    });
}

#[cfg(test)]
mod tests {
    use cgmath::{Matrix4, SquareMatrix, Vector4};

    use super::*;

    fn handle(i: usize) -> BatchHandle {
        BatchHandle(i)
    }

    #[test]
    fn children_inherit_parent_transforms() {
        let tree = SceneNode::group("root").translate(1.0, 0.0, 0.0).with_child(
            SceneNode::part("leaf", handle(0), Material::Flat([1.0; 4])).translate(0.0, 1.0, 0.0),
        );
        let mut stack = MatrixStack::new();
        let mut out = DrawList::new();
        traverse(&tree, &mut stack, Pass::Scene, &mut out);

        assert_eq!(out.len(), 1);
        let origin = out.calls()[0].model_view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(origin, Vector4::new(1.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn siblings_do_not_see_each_other() {
        let tree = SceneNode::group("root")
            .with_child(SceneNode::part("a", handle(0), Material::Flat([1.0; 4])).translate(5.0, 0.0, 0.0))
            .with_child(SceneNode::part("b", handle(1), Material::Flat([1.0; 4])));
        let mut stack = MatrixStack::new();
        let mut out = DrawList::new();
        traverse(&tree, &mut stack, Pass::Scene, &mut out);

        assert_eq!(out.calls()[1].model_view, Matrix4::identity());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn parts_are_drawn_in_authoring_order() {
        let tree = SceneNode::part("first", handle(3), Material::Flat([1.0; 4])).with_children(
            (0..3).map(|i| SceneNode::part("child", handle(i), Material::Flat([1.0; 4]))),
        );
        let mut out = DrawList::new();
        traverse(&tree, &mut MatrixStack::new(), Pass::Scene, &mut out);
        let order: Vec<usize> = out.calls().iter().map(|c| c.batch.index()).collect();
        assert_eq!(order, vec![3, 0, 1, 2]);
        assert_eq!(tree.part_count(), 4);
    }
}
