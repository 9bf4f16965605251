// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod decode;
pub mod derive;
pub mod encode;
pub mod hash;
pub mod prepare;
pub mod upload;
