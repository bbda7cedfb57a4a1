fn main() {
    if let Err(e) = momota_lib::run() {
        eprintln!("momota: {e}");
        std::process::exit(1);
    }
}
