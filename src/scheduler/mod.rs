pub mod holder_reconcile;
