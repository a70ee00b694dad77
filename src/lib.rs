//! This crate provides an ordered Binary Search Tree (BST) over values
//! carrying a total ordering.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` holds one value and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! These invariants make searching for a value `O(height)` (where `height`
//! is defined as the longest path from the root `Node` to a leaf `Node`)
//! and give sorted iteration for free by visiting the left subtree, then
//! the subtree root, then the right subtree.
//!
//! The tree here is a *set*: each value appears at most once and inserting
//! a duplicate is reported, not performed. It deliberately does **not**
//! rebalance itself. Inserting values in sorted order collapses it into a
//! chain whose height equals its size; callers who need `O(lg N)` height
//! on adversarial input want an AVL or red-black tree instead.
//!
//! Nodes are stored in a flat arena of slots addressed by index (see
//! [`arena`]), so structural edits are link rewrites rather than ownership
//! transfers and no operation recurses on the call stack.

#![deny(missing_docs)]

pub mod arena;
