pub mod windrose;
