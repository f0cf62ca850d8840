fn main() {
    hello_triangle::run();
}
