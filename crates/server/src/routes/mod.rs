// Copyright 2025 Alexandre D. Díaz
pub mod export;
pub mod index;
