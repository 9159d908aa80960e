fn main() {
    tailless::cli::run();
}
