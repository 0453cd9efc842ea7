//! Built-in site content: practice topics and questions, topic theory,
//! Core Java lessons, the learning roadmap and the portfolio sections.
//!
//! Everything here is created once at startup and never mutated.

use crate::domain::{
  Difficulty, Highlight, Lesson, LessonContent, LessonSection, LessonStatus, Level, PracticePrompt,
  Profile, Project, Question, Resource, RoadmapStage, Skill, SkillCategory, TestCase, Topic,
  TopicTheory,
};

fn topic(id: &str, title: &str, description: &str, icon: &str, level: Level, order: u32) -> Topic {
  Topic {
    id: id.into(),
    title: title.into(),
    description: description.into(),
    icon: icon.into(),
    level,
    order,
  }
}

fn case(input: &str, output: &str, is_public: bool) -> TestCase {
  TestCase { input: input.into(), output: output.into(), is_public }
}

const MAIN_SKELETON: &str = "public class Main {\n    public static void main(String[] args) {\n        // Write your code here\n    }\n}";

const SCANNER_SKELETON: &str = "import java.util.Scanner;\n\npublic class Main {\n    public static void main(String[] args) {\n        Scanner sc = new Scanner(System.in);\n        // Write your code here\n    }\n}";

/// The DSA practice topics, grouped by level in display order.
pub fn practice_topics() -> Vec<Topic> {
  use Level::*;
  vec![
    topic("java-fundamentals", "Java Fundamentals", "Variables, Data Types, Operators, Input/Output", "📚", Beginner, 1),
    topic("control-flow", "Control Flow & Loops", "If-else, Switch, For, While, Do-While", "🔄", Beginner, 2),
    topic("arrays", "Arrays", "1D Arrays, 2D Arrays, Array Manipulation", "📊", Beginner, 3),
    topic("strings", "Strings", "String Operations, StringBuilder, Pattern Matching", "📝", Beginner, 4),
    topic("functions", "Functions & Recursion", "Methods, Recursion, Backtracking Basics", "🔧", Beginner, 5),
    topic("oops", "Object-Oriented Programming", "Classes, Objects, Inheritance, Polymorphism, Encapsulation", "🎯", Intermediate, 6),
    topic("searching", "Searching Algorithms", "Linear Search, Binary Search, Ternary Search", "🔍", Intermediate, 7),
    topic("sorting", "Sorting Algorithms", "Bubble, Selection, Insertion, Merge, Quick Sort", "🔢", Intermediate, 8),
    topic("linked-list", "Linked Lists", "Singly, Doubly, Circular Linked Lists", "🔗", Intermediate, 9),
    topic("stacks", "Stacks", "Stack Operations, Applications, Problems", "📚", Intermediate, 10),
    topic("queues", "Queues", "Queue, Deque, Priority Queue, Circular Queue", "🎫", Intermediate, 11),
    topic("hashing", "Hashing", "HashMap, HashSet, Hash Functions, Collision Handling", "#️⃣", Intermediate, 12),
    topic("trees", "Trees", "Binary Trees, BST, AVL, Tree Traversals", "🌳", Advanced, 13),
    topic("heaps", "Heaps", "Min Heap, Max Heap, Heap Sort, Priority Queue", "⛰️", Advanced, 14),
    topic("graphs", "Graphs", "BFS, DFS, Shortest Path, MST, Topological Sort", "🕸️", Advanced, 15),
    topic("dynamic-programming", "Dynamic Programming", "Memoization, Tabulation, DP Patterns", "💎", Advanced, 16),
    topic("greedy", "Greedy Algorithms", "Activity Selection, Huffman Coding, Job Scheduling", "🎯", Advanced, 17),
    topic("backtracking", "Backtracking", "N-Queens, Sudoku, Permutations, Combinations", "↩️", Advanced, 18),
    topic("tries", "Tries", "Trie Implementation, Autocomplete, Word Search", "🔤", Advanced, 19),
    topic("segment-trees", "Segment Trees", "Range Queries, Lazy Propagation", "🌲", Advanced, 20),
    topic("advanced-graphs", "Advanced Graph Algorithms", "Network Flow, Strongly Connected Components, Bridges", "🌐", Expert, 21),
    topic("bit-manipulation", "Bit Manipulation", "Bitwise Operators, Bit Tricks, XOR Problems", "🔢", Expert, 22),
    topic("math-algorithms", "Mathematical Algorithms", "Number Theory, Prime Numbers, GCD, LCM, Modular Arithmetic", "🧮", Expert, 23),
    topic("string-algorithms", "Advanced String Algorithms", "KMP, Rabin-Karp, Z-Algorithm, Suffix Arrays", "📜", Expert, 24),
  ]
}

/// Built-in question bank. Ids are unique per topic.
pub fn practice_questions() -> Vec<Question> {
  vec![
    Question {
      id: 1,
      topic_id: "java-fundamentals".into(),
      title: "Hello World".into(),
      difficulty: Difficulty::Easy,
      description: "Write a program that prints \"Hello, World!\" to the console.".into(),
      starter_code: MAIN_SKELETON.into(),
      test_cases: vec![case("", "Hello, World!", true)],
      hints: vec![
        "Use System.out.println() to print a line.".into(),
        "Strings are written between double quotes.".into(),
      ],
      platform: None,
      link: None,
    },
    Question {
      id: 2,
      topic_id: "java-fundamentals".into(),
      title: "Add Two Numbers".into(),
      difficulty: Difficulty::Easy,
      description: "Take two numbers as input and print their sum".into(),
      starter_code: SCANNER_SKELETON.into(),
      test_cases: vec![case("2 3", "5", true), case("-4 10", "6", false)],
      hints: vec!["Read both values with sc.nextInt().".into()],
      platform: Some("HackerRank".into()),
      link: Some("https://www.hackerrank.com/challenges/java-stdin-and-stdout-1/problem".into()),
    },
    Question {
      id: 3,
      topic_id: "java-fundamentals".into(),
      title: "Simple Interest".into(),
      difficulty: Difficulty::Easy,
      description: "Calculate simple interest given principal, rate and time".into(),
      starter_code: SCANNER_SKELETON.into(),
      test_cases: vec![case("1000 5 2", "100.0", true), case("2500 4 3", "300.0", false)],
      hints: vec!["Simple interest is (P * R * T) / 100.".into(), "Use double for the result.".into()],
      platform: Some("HackerRank".into()),
      link: Some("https://www.hackerrank.com/challenges/java-stdin-stdout/problem".into()),
    },
    Question {
      id: 4,
      topic_id: "java-fundamentals".into(),
      title: "Swap Two Numbers".into(),
      difficulty: Difficulty::Easy,
      description: "Swap two numbers without using third variable".into(),
      starter_code: SCANNER_SKELETON.into(),
      test_cases: vec![case("3 7", "7 3", true)],
      hints: vec!["a = a + b; b = a - b; a = a - b;".into()],
      platform: Some("GeeksforGeeks".into()),
      link: Some("https://www.geeksforgeeks.org/problems/swap-two-numbers3844/1".into()),
    },
    Question {
      id: 1,
      topic_id: "control-flow".into(),
      title: "Check Even or Odd".into(),
      difficulty: Difficulty::Easy,
      description: "Read an integer and print \"Even\" or \"Odd\".".into(),
      starter_code: SCANNER_SKELETON.into(),
      test_cases: vec![case("4", "Even", true), case("7", "Odd", true), case("0", "Even", false)],
      hints: vec!["n % 2 == 0 means the number is even.".into()],
      platform: Some("HackerRank".into()),
      link: Some("https://www.hackerrank.com/challenges/java-if-else/problem".into()),
    },
    Question {
      id: 2,
      topic_id: "control-flow".into(),
      title: "Print 1 to N".into(),
      difficulty: Difficulty::Easy,
      description: "Print the numbers from 1 to N, one per line.".into(),
      starter_code: SCANNER_SKELETON.into(),
      test_cases: vec![case("3", "1\n2\n3", true)],
      hints: vec!["A for loop from 1 while i <= n.".into()],
      platform: None,
      link: None,
    },
    Question {
      id: 3,
      topic_id: "control-flow".into(),
      title: "FizzBuzz".into(),
      difficulty: Difficulty::Medium,
      description: "Print 1..N replacing multiples of 3 with Fizz, of 5 with Buzz and of both with FizzBuzz.".into(),
      starter_code: SCANNER_SKELETON.into(),
      test_cases: vec![case("5", "1\n2\nFizz\n4\nBuzz", true), case("15", "FizzBuzz", false)],
      hints: vec!["Check divisibility by 15 first.".into()],
      platform: Some("LeetCode".into()),
      link: Some("https://leetcode.com/problems/fizz-buzz/".into()),
    },
    Question {
      id: 1,
      topic_id: "arrays".into(),
      title: "Largest Element".into(),
      difficulty: Difficulty::Easy,
      description: "Find the largest element of an array.".into(),
      starter_code: MAIN_SKELETON.into(),
      test_cases: vec![case("[3, 9, 2]", "9", true), case("[-1, -5]", "-1", false)],
      hints: vec!["Start from arr[0] and compare with every element.".into()],
      platform: Some("GeeksforGeeks".into()),
      link: Some("https://www.geeksforgeeks.org/problems/largest-element-in-array4009/1".into()),
    },
    Question {
      id: 2,
      topic_id: "arrays".into(),
      title: "Two Sum".into(),
      difficulty: Difficulty::Easy,
      description: "Print the indices of the two numbers that add up to target.".into(),
      starter_code: MAIN_SKELETON.into(),
      test_cases: vec![case("[2, 7, 11, 15], 9", "0 1", true)],
      hints: vec!["A HashMap from value to index makes this O(n).".into()],
      platform: Some("LeetCode".into()),
      link: Some("https://leetcode.com/problems/two-sum/".into()),
    },
    Question {
      id: 1,
      topic_id: "strings".into(),
      title: "Reverse a String".into(),
      difficulty: Difficulty::Easy,
      description: "Print the given string reversed.".into(),
      starter_code: SCANNER_SKELETON.into(),
      test_cases: vec![case("hello", "olleh", true)],
      hints: vec!["new StringBuilder(s).reverse()".into()],
      platform: Some("LeetCode".into()),
      link: Some("https://leetcode.com/problems/reverse-string/".into()),
    },
    Question {
      id: 1,
      topic_id: "functions".into(),
      title: "Factorial Using Recursion".into(),
      difficulty: Difficulty::Easy,
      description: "Calculate factorial using recursion".into(),
      starter_code: MAIN_SKELETON.into(),
      test_cases: vec![case("5", "120", true), case("0", "1", false)],
      hints: vec!["Base case: factorial(0) = 1.".into()],
      platform: Some("GeeksforGeeks".into()),
      link: Some("https://practice.geeksforgeeks.org/problems/factorial5739/1".into()),
    },
  ]
}

pub fn topic_theory() -> Vec<TopicTheory> {
  vec![
    TopicTheory {
      topic_id: "java-fundamentals".into(),
      theory: "# Java Fundamentals\n\n## Variables & Data Types\n\n- **int**: 32-bit integer\n- **double**: 64-bit floating point\n- **char**: 16-bit Unicode character\n- **boolean**: true or false\n\n```java\nint age = 25;\nString name = \"John\";\nSystem.out.println(\"Output: \" + age);\n```\n".into(),
      resources: vec![
        Resource { title: "Java Documentation".into(), url: "https://docs.oracle.com/javase/tutorial/java/nutsandbolts/datatypes.html".into() },
        Resource { title: "W3Schools Java".into(), url: "https://www.w3schools.com/java/".into() },
      ],
    },
    TopicTheory {
      topic_id: "control-flow".into(),
      theory: "# Control Flow & Loops\n\n```java\nfor (int i = 0; i < 10; i++) {\n    System.out.println(i);\n}\n```\n".into(),
      resources: vec![
        Resource { title: "Control Flow Statements".into(), url: "https://docs.oracle.com/javase/tutorial/java/nutsandbolts/flow.html".into() },
      ],
    },
    TopicTheory {
      topic_id: "functions".into(),
      theory: "# Functions & Recursion\n\n### Base Case: Stopping condition\n### Recursive Case: Function calls itself\n\n```java\nint factorial(int n) {\n    if (n == 0 || n == 1) return 1;\n    return n * factorial(n - 1);\n}\n```\n".into(),
      resources: vec![
        Resource { title: "Methods Tutorial".into(), url: "https://docs.oracle.com/javase/tutorial/java/javaOO/methods.html".into() },
      ],
    },
  ]
}

fn lesson(id: &str, title: &str, description: &str, icon: &str, status: LessonStatus, order: u32, content: Option<LessonContent>) -> Lesson {
  Lesson {
    id: id.into(),
    title: title.into(),
    description: description.into(),
    icon: icon.into(),
    status,
    order,
    content,
  }
}

fn section(id: &str, title: &str, content: &str, code: Option<&str>) -> LessonSection {
  LessonSection { id: id.into(), title: title.into(), content: content.into(), code: code.map(Into::into) }
}

fn prompt(id: u32, question: &str, difficulty: Difficulty) -> PracticePrompt {
  PracticePrompt { id, question: question.into(), difficulty }
}

/// Core Java tutorial track.
pub fn lessons() -> Vec<Lesson> {
  use LessonStatus::*;
  vec![
    lesson("oops-basics", "OOP Basics", "Classes, Objects, Constructors, this keyword", "🎯", Active, 1, Some(LessonContent {
      title: "OOP Basics - Classes, Objects & Constructors".into(),
      sections: vec![
        section("what-is-oop", "1. What is Object-Oriented Programming?",
          "Object-Oriented Programming (OOP) is a programming paradigm based on the concept of \"objects\" which contain data and code.", None),
        section("class-and-object", "2. Class and Object",
          "**Class**: A blueprint for creating objects.\n\n**Object**: An instance of a class.",
          Some("public class Car {\n    String brand;\n\n    public void start() {\n        System.out.println(brand + \" is starting...\");\n    }\n}")),
        section("constructors", "3. Constructors",
          "A constructor initializes a new object and has no return type.",
          Some("public Car(String brand) {\n    this.brand = brand;\n}")),
      ],
      practice_questions: vec![
        prompt(1, "Create a Book class with title, author, price, and ISBN. Include constructors and methods to apply discount.", Difficulty::Easy),
        prompt(2, "Build a Rectangle class with length and width. Add methods to calculate area, perimeter, and compare with another rectangle.", Difficulty::Easy),
        prompt(3, "Design a ShoppingCart class that can add items, remove items, calculate total, and apply coupon codes.", Difficulty::Medium),
      ],
      key_takeaways: vec![
        "Class is a blueprint, Object is an instance".into(),
        "Constructors initialize objects and have no return type".into(),
        "this keyword refers to the current object".into(),
      ],
    })),
    lesson("oops-pillars", "OOP Pillars", "Encapsulation, Inheritance, Polymorphism, Abstraction", "🏛️", Active, 2, Some(LessonContent {
      title: "OOP Pillars - The Four Foundations".into(),
      sections: vec![
        section("encapsulation", "1. Encapsulation - Data Hiding",
          "Keep fields private and expose behaviour through methods.",
          Some("public class Account {\n    private double balance;\n\n    public double getBalance() {\n        return balance;\n    }\n}")),
        section("inheritance", "2. Inheritance - Code Reusability",
          "A subclass acquires the fields and methods of its parent with `extends`.", None),
      ],
      practice_questions: vec![
        prompt(1, "Model a Vehicle hierarchy with Car and Bike subclasses that override a describe() method.", Difficulty::Medium),
      ],
      key_takeaways: vec!["Prefer composition when the relationship is not is-a".into()],
    })),
    lesson("interfaces-abstract", "Interfaces & Abstract Classes", "Interface vs Abstract Class, Multiple Inheritance", "🔌", Active, 3, None),
    lesson("collections-framework", "Collections Framework", "List, Set, Map, Queue - Complete Guide", "📦", Active, 4, None),
    lesson("exception-handling", "Exception Handling", "Try-Catch, Custom Exceptions, Best Practices", "⚠️", Active, 5, Some(LessonContent {
      title: "Exception Handling - Robust Programs".into(),
      sections: vec![
        section("try-catch", "1. Try-Catch-Finally",
          "Wrap risky code in `try`, handle failures in `catch`, release resources in `finally`.",
          Some("try {\n    int x = 10 / 0;\n} catch (ArithmeticException e) {\n    System.out.println(\"Cannot divide by zero\");\n}")),
      ],
      practice_questions: vec![
        prompt(1, "Write a custom InsufficientFundsException and throw it from a withdraw method.", Difficulty::Easy),
      ],
      key_takeaways: vec!["Catch the most specific exception first".into()],
    })),
    lesson("multithreading", "Multithreading", "Threads, Synchronization, Executor Framework", "⚡", Active, 6, None),
    lesson("java8-features", "Java 8+ Features", "Lambda, Stream API, Optional, Functional Interface", "🚀", Active, 7, None),
    lesson("file-io", "File I/O", "File Handling, Serialization, NIO", "📁", Active, 8, None),
    lesson("generics", "Generics", "Generic Classes, Methods, Wildcards", "🔤", Active, 9, None),
    lesson("annotations", "Annotations", "Built-in & Custom Annotations", "@", ComingSoon, 10, None),
  ]
}

fn stage(id: &str, title: &str, description: &str, route: Option<&str>) -> RoadmapStage {
  RoadmapStage { id: id.into(), title: title.into(), description: description.into(), route: route.map(Into::into) }
}

pub fn roadmap() -> Vec<RoadmapStage> {
  vec![
    stage("dsa-java", "DSA with Java", "Master Data Structures & Algorithms with Java", Some("/java-practice")),
    stage("core-java", "Core Java", "Java Fundamentals & OOP Concepts", Some("/core-java")),
    stage("sql", "SQL & Database", "Database Design, SQL Queries & Optimization", None),
    stage("advanced-java", "Advanced Java", "Servlets, JSP, JSTL & Web Development", None),
    stage("jdbc-hibernate", "JDBC & Hibernate", "Database Connectivity & ORM", None),
    stage("spring", "Spring Framework", "Spring Core, MVC, AOP & Security", None),
    stage("spring-boot", "Spring Boot", "Build Production-Ready Applications", None),
    stage("microservices", "Microservices", "Microservices Architecture & Design", None),
    stage("testing", "Testing & Quality", "Unit Testing, Integration Testing & TDD", None),
    stage("devops", "DevOps & Tools", "CI/CD, Docker, Kubernetes & Cloud", None),
    stage("kafka", "Message Queues & Kafka", "Asynchronous Communication & Event Streaming", None),
    stage("lld", "Low Level Design (LLD)", "SOLID Principles & Design Patterns", None),
    stage("hld", "High Level Design (HLD)", "System Design & Architecture", None),
  ]
}

pub fn profile() -> Profile {
  Profile {
    name: "Jyotiranjan Panda".into(),
    headline: "Software Engineer".into(),
    summary: "Java Developer with 2 years of experience in Spring Boot, Microservices, and AWS. Passionate about building scalable applications and delivering high-quality solutions.".into(),
    about: vec![
      "I'm a Software Engineer with 1.5+ years of hands-on experience in designing, developing, and deploying scalable applications using Java, Spring Boot, and Microservices architecture.".into(),
      "Currently working at Ajatus Software Pvt. Ltd., I've delivered projects with 95%+ test coverage, optimized API response times by 25%, and deployed applications on AWS.".into(),
    ],
    highlights: vec![
      Highlight { title: "Clean Code".into(), description: "Writing maintainable, scalable, and efficient code following best practices".into() },
      Highlight { title: "1.5+ Years Experience".into(), description: "Hands-on experience with Java, Spring Boot, and Microservices architecture".into() },
      Highlight { title: "Problem Solver".into(), description: "Analytical mindset with a passion for solving complex technical challenges".into() },
    ],
    resume_url: "/resume/resume.pdf".into(),
  }
}

fn project(title: &str, description: &str, image: &str, tags: &[&str], github: Option<&str>, demo: Option<&str>) -> Project {
  Project {
    title: title.into(),
    description: description.into(),
    image: image.into(),
    tags: tags.iter().map(|t| t.to_string()).collect(),
    github: github.map(Into::into),
    demo: demo.map(Into::into),
  }
}

pub fn projects() -> Vec<Project> {
  vec![
    project("ICARDA", "A full-stack e-commerce application with payment integration, user authentication, and admin dashboard.",
      "https://cgspace.cgiar.org/server/api/core/bitstreams/25c93f75-06a3-4b54-a4d3-df231a1c48d5/content",
      &["React", "MySQL", "Spring Boot"], None, Some("https://icarda.ajatus.in/")),
    project("Task Management App", "Collaborative task management tool with real-time updates, drag-and-drop interface, and team features.",
      "https://images.unsplash.com/photo-1454165804606-c3d57bc86b40?w=800&auto=format&fit=crop",
      &["React", "Firebase", "Tailwind CSS"], Some("https://github.com/yourusername/project2"), Some("https://project2-demo.com")),
    project("Weather Dashboard", "Real-time weather application with forecasts, interactive maps, and location-based alerts.",
      "https://images.unsplash.com/photo-1504608524841-42fe6f032b4b?w=800&auto=format&fit=crop",
      &["React", "OpenWeather API", "Chart.js"], Some("https://github.com/yourusername/project3"), Some("https://project3-demo.com")),
    project("AI Chat Application", "Intelligent chatbot powered by AI with context awareness and natural language processing.",
      "https://images.unsplash.com/photo-1531746790731-6c087fecd65a?w=800&auto=format&fit=crop",
      &["React", "OpenAI API", "WebSocket"], Some("https://github.com/yourusername/project5"), Some("https://project5-demo.com")),
  ]
}

fn skills(pairs: &[(&str, u8)]) -> Vec<Skill> {
  pairs.iter().map(|(name, level)| Skill { name: name.to_string(), level: *level }).collect()
}

pub fn skill_categories() -> Vec<SkillCategory> {
  vec![
    SkillCategory {
      title: "Frontend".into(),
      skills: skills(&[("React", 90), ("TypeScript", 85), ("JavaScript", 95), ("Tailwind CSS", 90), ("HTML5", 95), ("CSS3", 90)]),
    },
    SkillCategory {
      title: "Backend".into(),
      skills: skills(&[("Java", 90), ("Spring Boot", 88), ("Node.js", 88), ("Python", 82), ("GraphQL", 75)]),
    },
    SkillCategory {
      title: "Database & Tools".into(),
      skills: skills(&[("MySQL", 85), ("PostgreSQL", 80), ("Redis", 70), ("Git", 90), ("Docker", 75), ("AWS", 70)]),
    },
  ]
}
