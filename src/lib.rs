// Library root
// -----------
// This crate exposes the pieces of the bulk import tool as a small library;
// the binary (`main.rs`) only parses arguments and sets up logging.
//
// Module responsibilities:
// - `extensions`: parses the accepted-extension list and rename table.
// - `scanner`: recursively lists the files under the documents directory.
// - `api`: HTTP upload of one file to the document service.
// - `importer`: drives scan, filter and sequential upload, and reports
//   per-file and final results.
pub mod api;
pub mod extensions;
pub mod importer;
pub mod scanner;
